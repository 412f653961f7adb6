//! Job posting domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a job posting.
///
/// Only `Published` postings are visible to anonymous and applicant
/// readers; `Draft` and `Closed` are visible only to members of the
/// owning organization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobStatus {
    Draft,
    Published,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a job posting. The organization id comes
/// from the caller's resolved scope, never from the request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJob {
    pub organization_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub status: JobStatus,
}

/// Fields that can be updated on an existing job posting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<Option<String>>,
    pub employment_type: Option<Option<String>>,
    pub status: Option<JobStatus>,
}

/// Which postings a reader may see, derived from their resolved role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobVisibility {
    /// Anonymous readers and applicants: published postings only.
    PublishedOnly,
    /// Members of an organization: all of that organization's
    /// postings plus other organizations' published ones.
    Tenant(Uuid),
    /// Platform super-admin: everything.
    All,
}
