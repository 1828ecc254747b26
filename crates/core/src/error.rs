//! Domain-level error type shared by every layer above the database.

use crate::types::DbId;

/// Errors raised by domain rules and ownership checks.
///
/// The API crate maps each variant onto an HTTP status; repositories keep
/// returning `sqlx::Error` and never construct these directly.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Ownership failure on an entity the caller may see exists.
    pub fn not_owner(entity: &str) -> Self {
        Self::Forbidden(format!("You do not have permission to access this {entity}"))
    }
}
