//! Todo repository
//!
//! Every query carries `user_id = $owner`; a row owned by someone else is
//! reported exactly like a missing row.

use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::DbError;
use crate::models::{NewTodo, TodoFilter, TodoPatch, TodoPublic, TodoState};

/// Todo record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub user_id: i32,
}

impl From<Todo> for TodoPublic {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            state: t.state,
        }
    }
}

/// Todo repository
pub struct TodoRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TodoRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a todo owned by `owner`.
    pub async fn create(&self, owner: i32, todo: &NewTodo) -> Result<Todo, DbError> {
        let todo: Todo = sqlx::query_as(
            r#"
            INSERT INTO todos (title, description, state, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, state, user_id
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.state)
        .bind(owner)
        .fetch_one(self.pool)
        .await?;

        Ok(todo)
    }

    /// List the owner's todos narrowed by `filter`.
    ///
    /// Predicates are appended in a fixed order (owner, title, description,
    /// state) and always joined with AND.
    pub async fn list(&self, owner: i32, filter: &TodoFilter) -> Result<Vec<Todo>, DbError> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, title, description, state, user_id FROM todos WHERE user_id = ",
        );
        query.push_bind(owner);

        // strpos keeps '%' and '_' literal, unlike LIKE
        if let Some(title) = &filter.title {
            query
                .push(" AND strpos(title, ")
                .push_bind(title.as_str())
                .push(") > 0");
        }
        if let Some(description) = &filter.description {
            query
                .push(" AND strpos(description, ")
                .push_bind(description.as_str())
                .push(") > 0");
        }
        if let Some(state) = filter.state {
            query.push(" AND state = ").push_bind(state);
        }

        query
            .push(" ORDER BY id LIMIT ")
            .push_bind(filter.pagination.sql_limit())
            .push(" OFFSET ")
            .push_bind(filter.pagination.sql_offset());

        let todos = query.build_query_as::<Todo>().fetch_all(self.pool).await?;
        Ok(todos)
    }

    /// Apply the fields present in `patch`.
    ///
    /// Absent fields bind as NULL and COALESCE back to the stored value.
    /// `user_id` is never part of the SET list.
    pub async fn update(&self, owner: i32, id: i32, patch: &TodoPatch) -> Result<Todo, DbError> {
        sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                state = COALESCE($5, state)
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, state, user_id
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.state)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::todo_not_found(id))
    }

    /// Permanently delete a todo.
    pub async fn delete(&self, owner: i32, id: i32) -> Result<(), DbError> {
        sqlx::query_scalar::<_, i32>(
            "DELETE FROM todos WHERE id = $1 AND user_id = $2 RETURNING id",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::todo_not_found(id))?;

        Ok(())
    }
}
