//! Storage seam used by the HTTP layer
//!
//! Handlers talk to `dyn Store`, so the same routes run against Postgres
//! (`PgStore`) or the in-process `MemoryStore`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{DbError, Todo, TodoRepo, User, UserCredentials, UserRepo};
use crate::models::{NewTodo, NewUser, Pagination, TodoFilter, TodoPatch};

#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, user: &NewUser, password_hash: &str) -> Result<User, DbError>;

    async fn find_user_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DbError>;

    async fn list_users(&self, pagination: &Pagination) -> Result<Vec<User>, DbError>;

    /// Overwrite username, email and password hash of user `id`.
    async fn update_user(
        &self,
        id: i32,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<User, DbError>;

    /// Remove the user together with their todos and tokens.
    async fn delete_user(&self, id: i32) -> Result<(), DbError>;

    async fn save_token(&self, user_id: i32, token_hash: &str) -> Result<(), DbError>;

    async fn user_for_token(&self, token_hash: &str) -> Result<Option<User>, DbError>;

    async fn create_todo(&self, owner: i32, todo: &NewTodo) -> Result<Todo, DbError>;

    async fn list_todos(&self, owner: i32, filter: &TodoFilter) -> Result<Vec<Todo>, DbError>;

    /// `DbError::NotFound` when `id` is missing or owned by someone else.
    async fn update_todo(&self, owner: i32, id: i32, patch: &TodoPatch)
        -> Result<Todo, DbError>;

    /// `DbError::NotFound` when `id` is missing or owned by someone else.
    async fn delete_todo(&self, owner: i32, id: i32) -> Result<(), DbError>;
}

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: &NewUser, password_hash: &str) -> Result<User, DbError> {
        UserRepo::new(&self.pool).create(user, password_hash).await
    }

    async fn find_user_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DbError> {
        UserRepo::new(&self.pool).find_by_username(username).await
    }

    async fn list_users(&self, pagination: &Pagination) -> Result<Vec<User>, DbError> {
        UserRepo::new(&self.pool).list(pagination).await
    }

    async fn update_user(
        &self,
        id: i32,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<User, DbError> {
        UserRepo::new(&self.pool).update(id, user, password_hash).await
    }

    async fn delete_user(&self, id: i32) -> Result<(), DbError> {
        UserRepo::new(&self.pool).delete(id).await
    }

    async fn save_token(&self, user_id: i32, token_hash: &str) -> Result<(), DbError> {
        UserRepo::new(&self.pool).save_token(user_id, token_hash).await
    }

    async fn user_for_token(&self, token_hash: &str) -> Result<Option<User>, DbError> {
        UserRepo::new(&self.pool).find_by_token_hash(token_hash).await
    }

    async fn create_todo(&self, owner: i32, todo: &NewTodo) -> Result<Todo, DbError> {
        TodoRepo::new(&self.pool).create(owner, todo).await
    }

    async fn list_todos(&self, owner: i32, filter: &TodoFilter) -> Result<Vec<Todo>, DbError> {
        TodoRepo::new(&self.pool).list(owner, filter).await
    }

    async fn update_todo(
        &self,
        owner: i32,
        id: i32,
        patch: &TodoPatch,
    ) -> Result<Todo, DbError> {
        TodoRepo::new(&self.pool).update(owner, id, patch).await
    }

    async fn delete_todo(&self, owner: i32, id: i32) -> Result<(), DbError> {
        TodoRepo::new(&self.pool).delete(owner, id).await
    }
}
