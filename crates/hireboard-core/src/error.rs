//! Error types for the Hireboard system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HireboardError {
    /// No valid session. Surfaced as a generic "please sign in"
    /// outcome; never distinguishes bad token from expired token.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Authenticated but the role check failed for a whole route.
    /// Single-resource scope mismatches map to `NotFound` instead,
    /// so out-of-tenant existence is never confirmed.
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Auth directory error: {0}")]
    AuthDirectory(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type HireboardResult<T> = Result<T, HireboardError>;
