//! HTTP service exposing CRUD over a single SQLite `todo` table.
//!
//! # Overview
//! Six routes (list, get, agenda, create, update, delete) backed by one
//! shared connection pool. Validation and statement building live in
//! `todo_core`; this crate executes the statements and maps outcomes to
//! status codes.
//!
//! # Design
//! - The pool is opened before the listener accepts anything and closed
//!   after the server has drained.
//! - Unexpected storage errors become a 500 for that request only.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;
pub mod storage;

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;

pub use config::{ConfigError, DatabaseConfig, ServerConfig};
pub use error::ServiceError;
pub use service::TodoService;
pub use storage::Storage;

pub fn app(storage: Storage) -> Router {
    routes::router(TodoService::new(storage))
}

/// Serve requests on `listener` until `shutdown` completes.
pub async fn run<F>(listener: TcpListener, storage: Storage, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(storage))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
