//! Application domain model.
//!
//! An application belongs to exactly one job posting and denormalizes
//! the owning organization id onto itself so that scope checks never
//! need the job row. Applicant profile fields are snapshotted at
//! submission time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Processing state of an application, owned by the company side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApplicationStatus {
    New,
    InProgress,
    Done,
    Rejected,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    /// Copied from the job row at submission time, never taken from
    /// the request.
    pub organization_id: Uuid,
    pub applicant_user_id: Uuid,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_message: String,
    pub status: ApplicationStatus,
    pub include_documents: bool,
    pub resume_path: Option<String>,
    pub cv_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to submit an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplication {
    pub job_id: Uuid,
    pub organization_id: Uuid,
    pub applicant_user_id: Uuid,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_message: String,
    pub include_documents: bool,
    pub resume_path: Option<String>,
    pub cv_path: Option<String>,
}

/// The minimal projection used for authorization: who owns the
/// application (organization) and who submitted it (applicant).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplicationHead {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub applicant_user_id: Uuid,
}
