//! SQLite execution of core statements.
//!
//! # Design
//! `Storage` owns the connection pool, which is opened once at startup and
//! shared by every request. It knows nothing about todo semantics beyond the
//! row shape: the statements come fully built from `todo_core::query` and are
//! bound positionally here.

use std::str::FromStr;
use std::time::Duration;

use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteQueryResult,
};
use sqlx::{FromRow, Sqlite};
use todo_core::{SqlValue, Statement, Todo};

use crate::config::DatabaseConfig;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS todo (
    id INTEGER PRIMARY KEY,
    todo TEXT NOT NULL,
    category TEXT NOT NULL,
    priority TEXT NOT NULL,
    status TEXT NOT NULL,
    due_date TEXT NOT NULL
)";

#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    todo: String,
    category: String,
    priority: String,
    status: String,
    due_date: String,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            todo: row.todo,
            category: row.category,
            priority: row.priority,
            status: row.status,
            due_date: row.due_date,
        }
    }
}

/// Shared handle to the todo database. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Connect to the configured database, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns the driver error if the URL is invalid, the database cannot be
    /// opened, or the schema bootstrap fails.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let storage = Self {
            pool: pool_options.connect_with(options).await?,
        };
        if config.bootstrap_schema {
            storage.bootstrap().await?;
        }
        Ok(storage)
    }

    /// Create the `todo` table if it does not exist yet.
    pub async fn bootstrap(&self) -> Result<(), sqlx::Error> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection. Further queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn fetch_all(&self, stmt: &Statement) -> Result<Vec<Todo>, sqlx::Error> {
        tracing::debug!(sql = %stmt.sql, params = stmt.params.len(), "fetch_all");
        let rows = bind_as(sqlx::query_as::<_, TodoRow>(&stmt.sql), &stmt.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    pub async fn fetch_optional(&self, stmt: &Statement) -> Result<Option<Todo>, sqlx::Error> {
        tracing::debug!(sql = %stmt.sql, params = stmt.params.len(), "fetch_optional");
        let row = bind_as(sqlx::query_as::<_, TodoRow>(&stmt.sql), &stmt.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Todo::from))
    }

    /// Whether the statement yields at least one row.
    pub async fn exists(&self, stmt: &Statement) -> Result<bool, sqlx::Error> {
        tracing::debug!(sql = %stmt.sql, params = stmt.params.len(), "exists");
        let row = bind(sqlx::query(&stmt.sql), &stmt.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    pub async fn execute(&self, stmt: &Statement) -> Result<SqliteQueryResult, sqlx::Error> {
        tracing::debug!(sql = %stmt.sql, params = stmt.params.len(), "execute");
        bind(sqlx::query(&stmt.sql), &stmt.params)
            .execute(&self.pool)
            .await
    }
}

fn bind<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(value) => query.bind(*value),
            SqlValue::Text(value) => query.bind(value.as_str()),
        };
    }
    query
}

fn bind_as<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    params: &'q [SqlValue],
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(value) => query.bind(*value),
            SqlValue::Text(value) => query.bind(value.as_str()),
        };
    }
    query
}
