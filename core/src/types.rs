//! Domain DTOs for the todo service.
//!
//! # Design
//! Two families of types live here. The raw request shapes (`ListParams`,
//! `AgendaParams`, `CreateTodo`, `UpdateTodo`) mirror what arrives over HTTP
//! and keep every field as loose as the wire allows. The validated shapes
//! (`TodoFilter`, `NewTodo`, `TodoChanges`) are only produced by the
//! constructors in `validate` and are the only inputs the query builder
//! accepts, so an unchecked value can never reach a statement.
//!
//! `Todo` is the read side. Its enumerated columns stay plain strings because
//! rows already in storage are returned as-is, never re-validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TodoError;
use crate::validate::Field;

/// A stored todo row, serialized with the storage column names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub todo: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub due_date: String,
}

/// Progress of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    ToDo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::ToDo, Status::InProgress, Status::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::ToDo => "TO DO",
            Status::InProgress => "IN PROGRESS",
            Status::Done => "DONE",
        }
    }
}

/// Urgency of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

/// Area of life a todo belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Work,
    Home,
    Learning,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Home, Category::Learning];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "WORK",
            Category::Home => "HOME",
            Category::Learning => "LEARNING",
        }
    }
}

impl FromStr for Status {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(TodoError::InvalidField(Field::Status))
    }
}

impl FromStr for Priority {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or(TodoError::InvalidField(Field::Priority))
    }
}

impl FromStr for Category {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(TodoError::InvalidField(Field::Category))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query string of `GET /todos/`. Every filter is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search_q: Option<String>,
    pub category: Option<String>,
}

/// Query string of `GET /agenda/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgendaParams {
    pub date: Option<String>,
}

/// Request payload for creating a todo.
///
/// `id` may be omitted, in which case storage assigns the row id. The
/// enumerated fields are optional here only so that a missing value is
/// reported as an invalid field rather than a malformed body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub id: Option<i64>,
    pub todo: String,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
}

/// Request payload for updating a todo. Only supplied, non-empty fields are
/// applied; everything else is left untouched in storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Validated list filters. Absent filters contribute no predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
    pub category: Option<Category>,
}

/// A fully validated todo ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub id: Option<i64>,
    pub todo: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub due_date: String,
}

/// A validated partial update. `due_date` is already in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub todo: Option<String>,
    pub category: Option<Category>,
    pub due_date: Option<String>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.todo.is_none()
            && self.category.is_none()
            && self.due_date.is_none()
    }
}

/// Response body of `POST /todos/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedTodo {
    #[serde(rename = "bookId")]
    pub book_id: i64,
}
