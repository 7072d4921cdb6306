//! Service errors and their HTTP mapping.
//!
//! Every error is answered with a JSON string body. Storage failures are
//! logged in full and answered with a generic message so driver details never
//! reach the client.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use todo_core::TodoError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A field failed validation; nothing was executed.
    #[error(transparent)]
    Invalid(#[from] TodoError),

    /// The request body was not the JSON we expect.
    #[error("{0}")]
    MalformedBody(String),

    /// The targeted todo does not exist.
    #[error("Todo not found")]
    NotFound,

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Invalid(_) | ServiceError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServiceError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };
        (status, Json(message)).into_response()
    }
}
