//! Environment loading and shared connection arguments
//!
//! `.env` files are read from `~/.todoctl/.env` and then the working
//! directory. dotenvy never overwrites variables that are already set, so
//! the real environment always wins.

use anyhow::{Context, Result};
use clap::Args;
use todo_server::db::{create_pool, migrations};
use todo_server::PgStore;

/// Load `.env` files from the standard locations.
pub fn load_env() {
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".todoctl/.env"));
    }
    let _ = dotenvy::dotenv();
}

/// Database connection arguments shared by subcommands
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,
}

impl DatabaseArgs {
    pub fn url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.todoctl/.env")
    }

    /// Connect and make sure the schema exists.
    pub async fn open_store(&self) -> Result<PgStore> {
        let pool = create_pool(self.url()?)
            .await
            .context("Failed to create database pool")?;
        migrations::up(&pool)
            .await
            .context("Failed to run migrations")?;
        Ok(PgStore::new(pool))
    }
}
