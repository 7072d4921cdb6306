//! Todo operations: validate, execute, map the outcome.
//!
//! # Design
//! Validation always runs before any mutating statement, so a rejected
//! request never changes a row. Update and delete are single conditional
//! statements whose affected-row count decides between success and
//! `NotFound`; there is no separate read ahead of the write for a concurrent
//! delete to slip into.
//!
//! A missing row wins over a bad body on update: when validation fails, an
//! existence probe runs first so that an unknown id is reported as 404
//! whatever the body contained.

use todo_core::{
    agenda_date, query, AgendaParams, CreateTodo, CreatedTodo, ListParams, NewTodo, Todo,
    TodoChanges, TodoFilter, UpdateTodo,
};

use crate::error::ServiceError;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct TodoService {
    storage: Storage,
}

impl TodoService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Todos matching every supplied filter; no filters match all rows.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Todo>, ServiceError> {
        let filter = TodoFilter::from_params(params)?;
        Ok(self.storage.fetch_all(&query::list(&filter)).await?)
    }

    /// The todo with `id`, if any.
    pub async fn get(&self, id: i64) -> Result<Option<Todo>, ServiceError> {
        Ok(self.storage.fetch_optional(&query::get_by_id(id)).await?)
    }

    /// Todos due on the requested date.
    pub async fn agenda(&self, params: &AgendaParams) -> Result<Vec<Todo>, ServiceError> {
        let date = agenda_date(params)?;
        Ok(self.storage.fetch_all(&query::agenda(&date)).await?)
    }

    /// Insert a todo and return the row id storage reports for it.
    pub async fn create(&self, input: CreateTodo) -> Result<CreatedTodo, ServiceError> {
        let todo = NewTodo::from_request(input)?;
        let result = self.storage.execute(&query::create(&todo)).await?;
        let book_id = result.last_insert_rowid();
        tracing::info!(id = book_id, "todo created");
        Ok(CreatedTodo { book_id })
    }

    /// Apply the supplied fields of `input` to the todo with `id`.
    pub async fn update(&self, id: i64, input: &UpdateTodo) -> Result<(), ServiceError> {
        let built = TodoChanges::from_request(input).and_then(|changes| query::update(id, &changes));
        let stmt = match built {
            Ok(stmt) => stmt,
            Err(err) => {
                self.ensure_exists(id).await?;
                return Err(err.into());
            }
        };

        if self.storage.execute(&stmt).await?.rows_affected() == 0 {
            return Err(ServiceError::NotFound);
        }
        tracing::info!(id, "todo updated");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if self.storage.execute(&query::delete(id)).await?.rows_affected() == 0 {
            return Err(ServiceError::NotFound);
        }
        tracing::info!(id, "todo deleted");
        Ok(())
    }

    /// `NotFound` unless a todo with `id` is stored.
    pub async fn ensure_exists(&self, id: i64) -> Result<(), ServiceError> {
        if self.storage.exists(&query::exists(id)).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }
}
