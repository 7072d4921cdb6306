//! Field validation for the enumerated todo columns.
//!
//! A field that is absent (or an empty string, which the HTTP surface treats
//! the same way) is never defaulted and never validated; it simply does not
//! take part in filtering or updating. The first invalid field aborts the
//! whole request.

use std::fmt;
use std::str::FromStr;

use crate::date::normalize_date;
use crate::error::TodoError;
use crate::types::{
    AgendaParams, Category, CreateTodo, ListParams, NewTodo, Priority, Status, TodoChanges,
    TodoFilter, UpdateTodo,
};

/// The enumerated columns of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Status,
    Priority,
    Category,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Status => "Status",
            Field::Priority => "Priority",
            Field::Category => "Category",
        })
    }
}

/// Check `value` against the domain of `field`.
pub fn validate_field(field: Field, value: &str) -> Result<(), TodoError> {
    match field {
        Field::Status => value.parse::<Status>().map(drop),
        Field::Priority => value.parse::<Priority>().map(drop),
        Field::Category => value.parse::<Category>().map(drop),
    }
}

/// Treat missing and empty values alike.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Parse an optional enumerated value; absent input yields `Ok(None)`.
pub fn optional<T>(value: Option<&str>) -> Result<Option<T>, TodoError>
where
    T: FromStr<Err = TodoError>,
{
    present(value).map(str::parse).transpose()
}

/// Parse a mandatory enumerated value; absent input is an invalid `field`.
pub fn required<T>(value: Option<&str>, field: Field) -> Result<T, TodoError>
where
    T: FromStr<Err = TodoError>,
{
    value.ok_or(TodoError::InvalidField(field))?.parse()
}

impl TodoFilter {
    pub fn from_params(params: &ListParams) -> Result<Self, TodoError> {
        Ok(TodoFilter {
            status: optional(params.status.as_deref())?,
            priority: optional(params.priority.as_deref())?,
            search: present(params.search_q.as_deref()).map(str::to_owned),
            category: optional(params.category.as_deref())?,
        })
    }
}

impl NewTodo {
    pub fn from_request(input: CreateTodo) -> Result<Self, TodoError> {
        let status = required(input.status.as_deref(), Field::Status)?;
        let priority = required(input.priority.as_deref(), Field::Priority)?;
        let category = required(input.category.as_deref(), Field::Category)?;
        let due_date = present(input.due_date.as_deref()).ok_or(TodoError::InvalidDate)?;
        let due_date = normalize_date(due_date)?;

        Ok(NewTodo {
            id: input.id,
            todo: input.todo,
            category,
            priority,
            status,
            due_date,
        })
    }
}

impl TodoChanges {
    pub fn from_request(input: &UpdateTodo) -> Result<Self, TodoError> {
        Ok(TodoChanges {
            status: optional(input.status.as_deref())?,
            priority: optional(input.priority.as_deref())?,
            todo: present(input.todo.as_deref()).map(str::to_owned),
            category: optional(input.category.as_deref())?,
            due_date: present(input.due_date.as_deref()).map(normalize_date).transpose()?,
        })
    }
}

/// The canonical date an agenda lookup asks for. The date is mandatory.
pub fn agenda_date(params: &AgendaParams) -> Result<String, TodoError> {
    normalize_date(present(params.date.as_deref()).ok_or(TodoError::InvalidDate)?)
}
