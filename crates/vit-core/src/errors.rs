//! Cross-cutting error types for Vitrine.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `StorageError`) are defined in
//! their respective crates. The server maps all of them onto HTTP statuses and
//! GraphQL error codes.

use thiserror::Error;

/// Errors that can be raised by any Vitrine crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// A form field failed validation.
    #[error("Validation error on '{field}': {message}")]
    Validation { field: String, message: String },
}

impl CoreError {
    /// Shorthand for a field validation failure.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
