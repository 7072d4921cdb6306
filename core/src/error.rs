//! Validation errors for todo requests.
//!
//! # Design
//! The `Display` text of each variant is exactly the message sent back to the
//! client, so the HTTP layer can forward `to_string()` without a second
//! mapping table. Storage and lookup failures belong to the server crate;
//! everything here is detected before a statement is ever built.

use thiserror::Error;

use crate::validate::Field;

/// Errors raised while turning a raw request into a validated one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// An enumerated field held a value outside its domain, or was missing
    /// where it is required.
    #[error("Invalid Todo {0}")]
    InvalidField(Field),

    /// A due date was missing where required or could not be parsed.
    #[error("Invalid Due Date")]
    InvalidDate,

    /// An update request carried no field to change.
    #[error("Invalid request. Please provide data to update.")]
    EmptyUpdate,
}
