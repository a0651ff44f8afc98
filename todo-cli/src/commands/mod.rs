//! Command implementations for todoctl

pub mod migrate;
pub mod serve;
pub mod user;

// Re-export dispatcher functions for flat access from main.rs
pub use migrate::run_migrate;
pub use serve::run_serve;
pub use user::run_user;
