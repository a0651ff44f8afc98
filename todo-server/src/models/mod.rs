//! Request and response shapes
//!
//! Input types are validated when they are built (serde for HTTP bodies,
//! constructors for everything else). Invalid input returns an error,
//! not a panic.

pub mod validation;
pub mod pagination;
pub mod todo;
pub mod user;

pub use validation::ValidationError;
pub use pagination::{PageParams, Pagination};
pub use todo::{
    ListTodosParams, Message, NewTodo, TodoFilter, TodoList, TodoPatch, TodoPublic, TodoState,
};
pub use user::{AccessToken, LoginForm, NewUser, UserList, UserPublic};
