//! User and token management
//!
//! Tokens are printed once; only their digest is stored.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use todo_server::auth;
use todo_server::db::User;
use todo_server::models::NewUser;

use crate::config::DatabaseArgs;

#[derive(Parser, Debug)]
#[command(about = "Create users and issue bearer tokens")]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a user and print a bearer token for it
    Add {
        /// Unique login name
        #[arg(long)]
        username: String,
        /// Email address (must be unique)
        #[arg(long)]
        email: String,
        /// Password (stored as an argon2 hash)
        #[arg(long, env = "TODOCTL_PASSWORD", hide_env_values = true)]
        password: String,
        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Verify a password and print a fresh bearer token
    Token {
        /// Login name
        #[arg(long)]
        username: String,
        /// Password
        #[arg(long, env = "TODOCTL_PASSWORD", hide_env_values = true)]
        password: String,
        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

pub async fn run_user(args: UserArgs) -> Result<()> {
    match args.command {
        UserCommand::Add {
            username,
            email,
            password,
            json,
        } => {
            let new_user = NewUser::new(&username, &email, &password)?;
            let store = args.db.open_store().await?;
            let user = auth::register(&store, &new_user)
                .await
                .context("Failed to create user")?;
            let token = auth::issue_token(&store, user.id)
                .await
                .context("Failed to issue token")?;
            print_token(&user, &token, json);
        }
        UserCommand::Token {
            username,
            password,
            json,
        } => {
            let store = args.db.open_store().await?;
            let user = auth::authenticate(&store, &username, &password).await?;
            let token = auth::issue_token(&store, user.id)
                .await
                .context("Failed to issue token")?;
            print_token(&user, &token, json);
        }
    }

    Ok(())
}

fn print_token(user: &User, token: &str, as_json: bool) {
    if as_json {
        println!(
            "{}",
            json!({"id": user.id, "username": user.username, "email": user.email, "token": token})
        );
    } else {
        println!("User {} (id {})", user.username, user.id);
        println!("Bearer token: {}", token);
    }
}
