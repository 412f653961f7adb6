//! Organization (tenant) domain model.
//!
//! Organizations are the unit of data isolation: job postings,
//! applications, conversations, and memberships all belong to exactly
//! one organization, and every read/write on those tables is filtered
//! by the acting user's resolved organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A company account on the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// URL-safe unique identifier (e.g., `acme-robotics`).
    pub slug: String,
    /// Free-form industry category.
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub slug: String,
    pub category: Option<String>,
}
