//! Schema migrations
//!
//! Structural DDL only. `up` is idempotent so the server can run it on
//! every start; `down` drops everything in reverse dependency order.

use sqlx::PgPool;

/// Create the enum type and tables.
pub async fn up(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running migrations (up)");

    // CREATE TYPE has no IF NOT EXISTS
    sqlx::query(
        r#"
        DO $$ BEGIN
            CREATE TYPE todostate AS ENUM ('draft', 'todo', 'doing', 'done', 'trash');
        EXCEPTION
            WHEN duplicate_object THEN NULL;
        END $$
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            state todostate NOT NULL,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_todos_user_id ON todos(user_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS api_tokens (
            token_hash TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Migrations complete");
    Ok(())
}

/// Drop all tables and the enum type.
pub async fn down(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::warn!("Running migrations (down) - all data will be dropped");

    for statement in [
        "DROP TABLE IF EXISTS api_tokens",
        "DROP TABLE IF EXISTS todos",
        "DROP TABLE IF EXISTS users",
        "DROP TYPE IF EXISTS todostate",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
