//! Membership domain models.
//!
//! Two membership representations coexist and are reconciled by the
//! role resolver in `hireboard-access`:
//!
//! - Primary: `AdminUser`, one row per user, binding the user to a
//!   platform-level role and (for org admins) a single organization.
//! - Secondary: `OrganizationMember`, one row per (organization, user),
//!   allowing multiple staff/admin members per organization.
//!
//! The primary table is authoritative when it yields a valid
//! org-bound admin; the secondary table is a fallback only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role stored on the primary membership table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AdminRole {
    /// Platform operator: cross-tenant administrative visibility,
    /// no implicit tenant scope.
    SuperAdmin,
    /// Company admin, bound to exactly one organization.
    OrgAdmin,
}

/// Primary membership row: at most one per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub user_id: Uuid,
    pub role: AdminRole,
    /// Required when `role` is `OrgAdmin`. A row with `OrgAdmin` and a
    /// null organization is malformed and must be treated as no match,
    /// never as elevated access.
    pub organization_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a primary membership row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminUser {
    pub user_id: Uuid,
    pub role: AdminRole,
    pub organization_id: Option<Uuid>,
}

/// Role stored on the secondary membership table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MemberRole {
    Admin,
    Staff,
}

/// Secondary membership row: one per (organization, user).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationMember {
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a secondary membership row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationMember {
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
}
