//! Todo payloads and response shapes
//!
//! Owner identity never appears in an input type: it comes from the
//! authenticated caller only. Unknown JSON fields (such as `user_id`) are
//! dropped by serde before a handler sees them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Pagination, ValidationError};

/// Lifecycle bucket of a todo. Any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "todostate", rename_all = "lowercase")]
pub enum TodoState {
    Draft,
    Todo,
    Doing,
    Done,
    Trash,
}

impl TodoState {
    pub const ALL: [TodoState; 5] = [
        TodoState::Draft,
        TodoState::Todo,
        TodoState::Doing,
        TodoState::Done,
        TodoState::Trash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
            Self::Trash => "trash",
        }
    }
}

impl fmt::Display for TodoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "state",
                value: s.to_owned(),
            })
    }
}

/// POST /todos/ body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub state: TodoState,
}

/// PATCH /todos/{id} body
///
/// `None` leaves the stored value untouched; `Some("")` overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TodoPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<TodoState>,
}

/// Todo as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPublic {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub state: TodoState,
}

/// GET /todos/ response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<TodoPublic>,
}

/// Plain confirmation body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// GET /todos/ query string
///
/// Values stay raw strings so that `?state=` means "no filter", the same as
/// `?title=`; the state is parsed once blanks are dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTodosParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Owner-independent list filters, applied after owner-scoping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Substring of the title
    pub title: Option<String>,
    /// Substring of the description
    pub description: Option<String>,
    /// Exact state
    pub state: Option<TodoState>,
    pub pagination: Pagination,
}

impl TryFrom<ListTodosParams> for TodoFilter {
    type Error = ValidationError;

    fn try_from(params: ListTodosParams) -> Result<Self, Self::Error> {
        let state = params
            .state
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<TodoState>())
            .transpose()?;

        Ok(Self {
            title: params.title.filter(|s| !s.is_empty()),
            description: params.description.filter(|s| !s.is_empty()),
            state,
            pagination: Pagination::new(params.offset, params.limit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_parses_closed_set() {
        for state in TodoState::ALL {
            assert_eq!(state.as_str().parse::<TodoState>().unwrap(), state);
        }
        let err = "archived".parse::<TodoState>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "state", .. }));
    }

    #[test]
    fn state_serializes_lowercase() {
        assert_eq!(serde_json::to_value(TodoState::Doing).unwrap(), "doing");
        assert!(serde_json::from_str::<TodoState>(r#""Doing""#).is_err());
    }

    #[test]
    fn new_todo_requires_every_field() {
        let missing: Result<NewTodo, _> =
            serde_json::from_str(r#"{"title":"T","state":"todo"}"#);
        assert!(missing.is_err());

        let bad_state: Result<NewTodo, _> =
            serde_json::from_str(r#"{"title":"T","description":"D","state":"later"}"#);
        assert!(bad_state.is_err());
    }

    #[test]
    fn new_todo_ignores_client_owner() {
        let todo: NewTodo = serde_json::from_str(
            r#"{"title":"T","description":"D","state":"todo","user_id":99}"#,
        )
        .unwrap();
        assert_eq!(todo.title, "T");
        assert_eq!(todo.state, TodoState::Todo);
    }

    #[test]
    fn patch_distinguishes_unset_from_empty() {
        let patch: TodoPatch = serde_json::from_str(r#"{"title":""}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some(""));
        assert!(patch.description.is_none());
        assert!(patch.state.is_none());

        let empty: TodoPatch = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, TodoPatch::default());
    }

    #[test]
    fn public_todo_has_no_owner() {
        let todo = TodoPublic {
            id: 1,
            title: "T".into(),
            description: "D".into(),
            state: TodoState::Todo,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "title": "T", "description": "D", "state": "todo"})
        );
    }

    #[test]
    fn filter_drops_blank_substrings() {
        let filter = TodoFilter::try_from(ListTodosParams {
            title: Some(String::new()),
            description: Some("milk".into()),
            state: Some("done".into()),
            offset: None,
            limit: Some(5),
        })
        .unwrap();
        assert_eq!(filter.title, None);
        assert_eq!(filter.description.as_deref(), Some("milk"));
        assert_eq!(filter.state, Some(TodoState::Done));
        assert_eq!(filter.pagination, Pagination::new(None, Some(5)));
    }

    #[test]
    fn blank_state_is_no_filter() {
        let filter = TodoFilter::try_from(ListTodosParams {
            title: Some(String::new()),
            description: Some(String::new()),
            state: Some(String::new()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter, TodoFilter::default());
    }

    #[test]
    fn unknown_state_filter_is_rejected() {
        let err = TodoFilter::try_from(ListTodosParams {
            state: Some("someday".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidVariant {
                field: "state",
                value: "someday".into()
            }
        );
    }
}
