//! Database-specific error types and conversions.

use hireboard_core::error::HireboardError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Row decode failed: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for HireboardError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => HireboardError::NotFound { entity, id },
            // Raw database error text stays inside Database(..); route
            // layers log it but never echo it to applicant-facing
            // surfaces.
            other => HireboardError::Database(other.to_string()),
        }
    }
}
