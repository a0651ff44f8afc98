//! HTTP server command
//!
//! Runs migrations and serves the todo API. `--memory` swaps Postgres for
//! an in-process store and creates a demo user, which is handy for poking
//! at the API without a database.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use todo_server::auth;
use todo_server::models::NewUser;
use todo_server::{run_server, AppState, MemoryStore, ServerConfig};

use crate::config::DatabaseArgs;

const DEMO_USER: &str = "demo";

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "TODOCTL_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep data in memory instead of Postgres (lost on exit)
    #[arg(long)]
    pub memory: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let state = if args.memory {
        memory_state().await?
    } else {
        AppState::new(args.db.open_store().await?)
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    tracing::info!("Starting todo server on {}", config.bind_addr);
    run_server(state, config).await.context("Server error")?;

    Ok(())
}

async fn memory_state() -> Result<AppState> {
    tracing::warn!("Using in-memory store - data will be lost on exit");
    let state = AppState::new(MemoryStore::new());

    let demo = NewUser::new(DEMO_USER, "demo@localhost", DEMO_USER)?;
    let user = auth::register(state.store(), &demo)
        .await
        .context("Failed to create demo user")?;
    let token = auth::issue_token(state.store(), user.id)
        .await
        .context("Failed to issue demo token")?;

    println!("Demo user '{}' token: {}", user.username, token);
    Ok(state)
}
