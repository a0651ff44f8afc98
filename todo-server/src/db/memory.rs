//! In-process store with the same semantics as `PgStore`
//!
//! Data lives for the lifetime of the process. Ids are assigned from 1 in
//! insertion order, and listing is ordered by id, matching the Postgres
//! SERIAL columns and `ORDER BY id`.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repos::{DbError, Todo, User, UserCredentials};
use super::store::Store;
use crate::models::{NewTodo, NewUser, Pagination, TodoFilter, TodoPatch};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, UserCredentials>,
    tokens: HashMap<String, i32>,
    todos: BTreeMap<i32, Todo>,
    next_user_id: i32,
    next_todo_id: i32,
}

impl Tables {
    /// Username or email already held by a user other than `except`.
    fn identity_taken(&self, user: &NewUser, except: Option<i32>) -> bool {
        self.users.values().any(|existing| {
            Some(existing.user.id) != except
                && (existing.user.username == user.username()
                    || existing.user.email == user.email())
        })
    }

    fn owned_todo_mut(&mut self, owner: i32, id: i32) -> Option<&mut Todo> {
        self.todos.get_mut(&id).filter(|todo| todo.user_id == owner)
    }
}

/// Memory-backed store
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn passes_filter(todo: &Todo, filter: &TodoFilter) -> bool {
    filter
        .title
        .as_deref()
        .map_or(true, |needle| todo.title.contains(needle))
        && filter
            .description
            .as_deref()
            .map_or(true, |needle| todo.description.contains(needle))
        && filter.state.map_or(true, |state| todo.state == state)
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: &NewUser, password_hash: &str) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;

        if tables.identity_taken(user, None) {
            return Err(DbError::Conflict(
                "username or email already registered".into(),
            ));
        }

        tables.next_user_id += 1;
        let record = User {
            id: tables.next_user_id,
            username: user.username().to_owned(),
            email: user.email().to_owned(),
        };
        tables.users.insert(
            record.id,
            UserCredentials {
                user: record.clone(),
                password_hash: password_hash.to_owned(),
            },
        );

        Ok(record)
    }

    async fn find_user_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|creds| creds.user.username == username)
            .cloned())
    }

    async fn list_users(&self, pagination: &Pagination) -> Result<Vec<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(pagination.apply(tables.users.values().map(|creds| creds.user.clone())))
    }

    async fn update_user(
        &self,
        id: i32,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Err(DbError::user_not_found(id));
        }
        if tables.identity_taken(user, Some(id)) {
            return Err(DbError::Conflict(
                "username or email already registered".into(),
            ));
        }

        let record = User {
            id,
            username: user.username().to_owned(),
            email: user.email().to_owned(),
        };
        tables.users.insert(
            id,
            UserCredentials {
                user: record.clone(),
                password_hash: password_hash.to_owned(),
            },
        );

        Ok(record)
    }

    async fn delete_user(&self, id: i32) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        tables
            .users
            .remove(&id)
            .ok_or_else(|| DbError::user_not_found(id))?;
        tables.tokens.retain(|_, owner| *owner != id);
        tables.todos.retain(|_, todo| todo.user_id != id);
        Ok(())
    }

    async fn save_token(&self, user_id: i32, token_hash: &str) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(DbError::user_not_found(user_id));
        }
        tables.tokens.insert(token_hash.to_owned(), user_id);
        Ok(())
    }

    async fn user_for_token(&self, token_hash: &str) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tokens
            .get(token_hash)
            .and_then(|id| tables.users.get(id))
            .map(|creds| creds.user.clone()))
    }

    async fn create_todo(&self, owner: i32, todo: &NewTodo) -> Result<Todo, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&owner) {
            return Err(DbError::user_not_found(owner));
        }

        tables.next_todo_id += 1;
        let record = Todo {
            id: tables.next_todo_id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            state: todo.state,
            user_id: owner,
        };
        tables.todos.insert(record.id, record.clone());

        Ok(record)
    }

    async fn list_todos(&self, owner: i32, filter: &TodoFilter) -> Result<Vec<Todo>, DbError> {
        let tables = self.tables.read().await;
        let matching = tables
            .todos
            .values()
            .filter(|todo| todo.user_id == owner)
            .filter(|todo| passes_filter(todo, filter))
            .cloned();

        Ok(filter.pagination.apply(matching))
    }

    async fn update_todo(
        &self,
        owner: i32,
        id: i32,
        patch: &TodoPatch,
    ) -> Result<Todo, DbError> {
        let mut tables = self.tables.write().await;
        let todo = tables
            .owned_todo_mut(owner, id)
            .ok_or_else(|| DbError::todo_not_found(id))?;

        if let Some(title) = &patch.title {
            todo.title = title.clone();
        }
        if let Some(description) = &patch.description {
            todo.description = description.clone();
        }
        if let Some(state) = patch.state {
            todo.state = state;
        }

        Ok(todo.clone())
    }

    async fn delete_todo(&self, owner: i32, id: i32) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        tables
            .owned_todo_mut(owner, id)
            .ok_or_else(|| DbError::todo_not_found(id))?;
        tables.todos.remove(&id);
        Ok(())
    }
}
