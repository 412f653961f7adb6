//! Role lookup — resolves who the acting user is allowed to be.
//!
//! Reconciles the two membership representations: the primary
//! single-row-per-user table is authoritative when it yields a valid
//! org-bound admin; the secondary per-organization member table is
//! consulted only as a fallback. A pure read with no side effects.

use hireboard_core::error::HireboardResult;
use hireboard_core::models::membership::{AdminRole, MemberRole};
use hireboard_core::repository::MembershipRepository;
use tracing::warn;
use uuid::Uuid;

/// Member level within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberLevel {
    Admin,
    Staff,
}

/// The resolved role of the acting user for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleResult {
    /// No valid session.
    Unauthenticated,
    /// Authenticated, no membership anywhere: a job seeker.
    Applicant,
    /// Bound to exactly one organization for the duration of the
    /// request; all tenant-scoped operations are filtered to it.
    TenantMember {
        organization_id: Uuid,
        level: MemberLevel,
    },
    /// Platform operator. Never implicitly tenant-scoped.
    PlatformSuperAdmin,
}

/// Resolves a user id to a [`RoleResult`] against the membership
/// tables.
pub struct RoleResolver<M: MembershipRepository> {
    memberships: M,
}

impl<M: MembershipRepository> RoleResolver<M> {
    pub fn new(memberships: M) -> Self {
        Self { memberships }
    }

    /// Resolve the role for a request.
    ///
    /// `None` (no session) short-circuits to `Unauthenticated` without
    /// touching the store. Otherwise: primary table first, secondary
    /// as fallback, `Applicant` when neither yields a usable row.
    pub async fn resolve(&self, user_id: Option<Uuid>) -> HireboardResult<RoleResult> {
        let Some(user_id) = user_id else {
            return Ok(RoleResult::Unauthenticated);
        };

        if let Some(admin) = self.memberships.find_admin_user(user_id).await? {
            match (admin.role, admin.organization_id) {
                // A super-admin is never implicitly tenant-scoped;
                // any organization id on the row is ignored.
                (AdminRole::SuperAdmin, _) => return Ok(RoleResult::PlatformSuperAdmin),
                (AdminRole::OrgAdmin, Some(organization_id)) => {
                    return Ok(RoleResult::TenantMember {
                        organization_id,
                        level: MemberLevel::Admin,
                    });
                }
                // Malformed row: org-admin with no organization. Falls
                // through to the secondary lookup rather than erroring,
                // and never grants elevated access.
                (AdminRole::OrgAdmin, None) => {
                    warn!(%user_id, "primary membership row has OrgAdmin role but no organization");
                }
            }
        }

        if let Some(member) = self.memberships.find_member(user_id).await? {
            let level = match member.role {
                MemberRole::Admin => MemberLevel::Admin,
                MemberRole::Staff => MemberLevel::Staff,
            };
            return Ok(RoleResult::TenantMember {
                organization_id: member.organization_id,
                level,
            });
        }

        Ok(RoleResult::Applicant)
    }
}
