//! Authorization error types.

use hireboard_core::error::HireboardError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("not authenticated")]
    Unauthenticated,

    /// Role check failed for a whole route (e.g. an applicant hitting
    /// a company-admin endpoint).
    #[error("access denied: {0}")]
    Denied(String),

    /// Scope mismatch on a single resource. Deliberately maps to a
    /// generic not-found so probing callers cannot confirm that an
    /// out-of-tenant resource exists.
    #[error("resource not found: {entity} with id {id}")]
    ScopeMismatch { entity: String, id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<AccessError> for HireboardError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => HireboardError::Unauthenticated,
            AccessError::Denied(reason) => HireboardError::Forbidden { reason },
            AccessError::ScopeMismatch { entity, id } => HireboardError::NotFound { entity, id },
            AccessError::InvalidInput(message) => HireboardError::Validation { message },
        }
    }
}
