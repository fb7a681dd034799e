//! Domain-level error type shared by all crates.

use crate::types::DbId;

/// Errors raised by domain logic and the persistence layer.
///
/// The API crate maps each variant to an HTTP status code; nothing in this
/// crate knows about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed validation against the domain rules.
    #[error("{0}")]
    Validation(String),

    /// A concurrent writer won the race, or a uniqueness rule was violated.
    #[error("{0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("{0}")]
    Forbidden(String),

    /// Anything unexpected; details are logged, not surfaced.
    #[error("{0}")]
    Internal(String),
}
