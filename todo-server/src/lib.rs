//! todo-server: per-user to-do list HTTP API
//!
//! Users register, log in for a bearer token and manage their own account
//! and todos.
//! Every todo query is scoped to the authenticated owner before any other
//! filter is applied.

pub mod auth;
pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use db::{MemoryStore, PgStore, Store};
pub use http::{build_router, run_server, ServerConfig};
pub use state::AppState;
