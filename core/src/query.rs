//! Parameterized SQL statements for the `todo` table.
//!
//! # Design
//! Statements are built as plain data: the SQL text plus the values to bind,
//! in placeholder order. Nothing here executes anything; the server crate
//! binds `params` positionally and runs the statement. Values are always
//! bound and never spliced into `sql`, the row id included.
//!
//! Builders accept only validated inputs (`TodoFilter`, `NewTodo`,
//! `TodoChanges`), so a clause exists exactly when its field was supplied and
//! passed validation.

use serde::{Deserialize, Serialize};

use crate::error::TodoError;
use crate::types::{NewTodo, TodoChanges, TodoFilter};

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Integer)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

/// SQL text and its bound parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }
}

/// `SELECT` over every row matching the conjunction of the given filters.
pub fn list(filter: &TodoFilter) -> Statement {
    let mut stmt = Statement::new("SELECT * FROM todo WHERE 1");

    if let Some(status) = filter.status {
        stmt.sql.push_str(" AND status = ?");
        stmt.params.push(status.as_str().into());
    }
    if let Some(priority) = filter.priority {
        stmt.sql.push_str(" AND priority = ?");
        stmt.params.push(priority.as_str().into());
    }
    if let Some(search) = &filter.search {
        stmt.sql.push_str(" AND todo LIKE ?");
        stmt.params.push(format!("%{search}%").into());
    }
    if let Some(category) = filter.category {
        stmt.sql.push_str(" AND category = ?");
        stmt.params.push(category.as_str().into());
    }

    stmt
}

pub fn get_by_id(id: i64) -> Statement {
    Statement::new("SELECT * FROM todo WHERE id = ?").bind(id)
}

/// Probe used to tell a missing row apart from a bad request body.
pub fn exists(id: i64) -> Statement {
    Statement::new("SELECT 1 FROM todo WHERE id = ?").bind(id)
}

/// Rows due on `date`, which must already be in canonical form.
pub fn agenda(date: &str) -> Statement {
    Statement::new("SELECT * FROM todo WHERE due_date = ?").bind(date)
}

pub fn create(todo: &NewTodo) -> Statement {
    Statement::new(
        "INSERT INTO todo (id, todo, category, priority, status, due_date) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(todo.id)
    .bind(todo.todo.as_str())
    .bind(todo.category.as_str())
    .bind(todo.priority.as_str())
    .bind(todo.status.as_str())
    .bind(todo.due_date.as_str())
}

/// `UPDATE` of the supplied columns only, with the id bound last.
///
/// Assignments follow the order status, priority, todo, category, due_date.
/// An empty change set has no valid SQL form and is rejected.
pub fn update(id: i64, changes: &TodoChanges) -> Result<Statement, TodoError> {
    if changes.is_empty() {
        return Err(TodoError::EmptyUpdate);
    }

    let mut assignments = Vec::with_capacity(5);
    let mut params: Vec<SqlValue> = Vec::with_capacity(6);

    if let Some(status) = changes.status {
        assignments.push("status = ?");
        params.push(status.as_str().into());
    }
    if let Some(priority) = changes.priority {
        assignments.push("priority = ?");
        params.push(priority.as_str().into());
    }
    if let Some(todo) = &changes.todo {
        assignments.push("todo = ?");
        params.push(todo.as_str().into());
    }
    if let Some(category) = changes.category {
        assignments.push("category = ?");
        params.push(category.as_str().into());
    }
    if let Some(due_date) = &changes.due_date {
        assignments.push("due_date = ?");
        params.push(due_date.as_str().into());
    }
    params.push(id.into());

    Ok(Statement {
        sql: format!("UPDATE todo SET {} WHERE id = ?", assignments.join(", ")),
        params,
    })
}

pub fn delete(id: i64) -> Statement {
    Statement::new("DELETE FROM todo WHERE id = ?").bind(id)
}
