//! User and API token repository

use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::{NewUser, Pagination, UserPublic};

/// User record without its credential
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<User> for UserPublic {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
        }
    }
}

/// User plus stored password hash, for credential checks only
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    #[sqlx(flatten)]
    pub user: User,
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user. Duplicate username or email maps to `DbError::Conflict`.
    pub async fn create(&self, user: &NewUser, password_hash: &str) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email
            "#,
        )
        .bind(user.username())
        .bind(user.email())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(unique_as_conflict)
    }

    /// Users ordered by id.
    pub async fn list(&self, pagination: &Pagination) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email FROM users ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(pagination.sql_limit())
        .bind(pagination.sql_offset())
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Replace every column of user `id`.
    pub async fn update(
        &self,
        id: i32,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2, email = $3, password = $4
            WHERE id = $1
            RETURNING id, username, email
            "#,
        )
        .bind(id)
        .bind(user.username())
        .bind(user.email())
        .bind(password_hash)
        .fetch_optional(self.pool)
        .await
        .map_err(unique_as_conflict)?
        .ok_or_else(|| DbError::user_not_found(id))
    }

    /// Delete user `id`; their todos and tokens go with them (ON DELETE CASCADE).
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        sqlx::query_scalar::<_, i32>("DELETE FROM users WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::user_not_found(id))?;

        Ok(())
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DbError> {
        let row = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, email, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Store the digest of a freshly issued bearer token.
    pub async fn save_token(&self, user_id: i32, token_hash: &str) -> Result<(), DbError> {
        sqlx::query("INSERT INTO api_tokens (token_hash, user_id) VALUES ($1, $2)")
            .bind(token_hash)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Resolve a token digest to its owner.
    pub async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.email
            FROM api_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }
}

fn unique_as_conflict(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            DbError::Conflict("username or email already registered".into())
        }
        other => DbError::Sqlx(other),
    }
}
