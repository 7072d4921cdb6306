//! Domain core for the todo service.
//!
//! # Overview
//! Validates request fields, normalizes due dates and builds parameterized
//! SQL statements without touching a database (host-does-IO pattern). The
//! server crate executes the statements, which keeps this crate
//! deterministic and testable without storage.
//!
//! # Design
//! - Raw request DTOs are turned into validated types by `validate`; the
//!   query builders in `query` only accept the validated types.
//! - `query::Statement` is plain data (`sql` + `params`), so the exact SQL a
//!   request produces can be asserted in tests and test vectors.
//! - Error messages are the client-facing strings.

pub mod date;
pub mod error;
pub mod query;
pub mod types;
pub mod validate;

pub use date::normalize_date;
pub use error::TodoError;
pub use query::{SqlValue, Statement};
pub use types::{
    AgendaParams, Category, CreateTodo, CreatedTodo, ListParams, NewTodo, Priority, Status, Todo,
    TodoChanges, TodoFilter, UpdateTodo,
};
pub use validate::{agenda_date, validate_field, Field};
