//! Schema migration command

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use todo_server::db::{create_pool, migrations};

use crate::config::DatabaseArgs;

#[derive(Parser, Debug)]
#[command(about = "Create or drop the database schema")]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub direction: MigrateDirection,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

#[derive(Subcommand, Debug)]
pub enum MigrateDirection {
    /// Create the enum type and tables (idempotent)
    Up,
    /// Drop all tables and the enum type
    Down {
        /// Confirm that all data should be dropped
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    if let MigrateDirection::Down { yes: false } = args.direction {
        bail!("refusing to drop the schema without --yes");
    }

    let pool = create_pool(args.db.url()?)
        .await
        .context("Failed to create database pool")?;

    match args.direction {
        MigrateDirection::Up => {
            migrations::up(&pool).await.context("Migration up failed")?;
            println!("Schema is up to date");
        }
        MigrateDirection::Down { .. } => {
            migrations::down(&pool)
                .await
                .context("Migration down failed")?;
            println!("Schema dropped");
        }
    }

    Ok(())
}
