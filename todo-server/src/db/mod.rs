//! Database layer - connection pool, migrations, repositories and stores
//!
//! # Design Principles
//!
//! - Connection pool shared through `PgStore`, no Arc<Mutex<Connection>>
//! - One statement per request-level operation
//! - Owner-scoping is part of every todo query, never optional
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use memory::MemoryStore;
pub use pool::create_pool;
pub use repos::*;
pub use store::{PgStore, Store};
