//! todoctl - operator CLI for the to-do API
//!
//! - `serve`: run the HTTP API (Postgres, or in-memory with `--memory`)
//! - `migrate`: create or drop the schema
//! - `user`: register users and issue bearer tokens

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "Per-user to-do list API server and admin tool"
)]
struct Cli {
    /// Debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (needs the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create or drop the database schema
    Migrate(commands::migrate::MigrateArgs),
    /// Create users and issue bearer tokens
    User(commands::user::UserArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_env();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
        Commands::User(args) => commands::run_user(args).await,
    };

    tracing_setup::shutdown();
    result
}
