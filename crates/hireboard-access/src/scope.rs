//! Row-scope enforcement.
//!
//! List reads attach the scope as an equality filter on the
//! organization column. Single-row writes are the higher-risk case —
//! the row id itself may be attacker-supplied — so the enforcer does a
//! combined lookup-and-verify: fetch the target row's organization id,
//! compare it against the decision's scope, and only then permit the
//! mutation (which itself still carries the scope filter in its
//! query). A mismatch surfaces as not-found, never forbidden.

use hireboard_core::error::HireboardResult;
use hireboard_core::models::application::{Application, ApplicationStatus};
use hireboard_core::repository::ApplicationRepository;
use tracing::debug;
use uuid::Uuid;

use crate::decision::{Decision, TenantScope};
use crate::error::AccessError;

impl TenantScope {
    /// The equality filter to attach to a list read: `None` for an
    /// unfiltered platform-admin read, `Some` for a pinned tenant.
    /// An identity-bound scope has no tenant reach and cannot become
    /// a list filter at all.
    pub fn filter(&self) -> Result<Option<Uuid>, AccessError> {
        match self {
            TenantScope::All => Ok(None),
            TenantScope::Tenant(organization_id) => Ok(Some(*organization_id)),
            TenantScope::Identity => Err(AccessError::Denied(
                "identity-bound access carries no tenant scope".into(),
            )),
        }
    }

    /// Verify a fetched row's organization against this scope.
    ///
    /// The organization id must come from the fetched row, never from
    /// the request. Mismatches are reported as not-found. The
    /// identity-bound scope never passes a tenant row check; those
    /// grants go through the conversation and files gates instead.
    pub fn check_row(
        &self,
        entity: &str,
        row_id: Uuid,
        row_organization_id: Uuid,
    ) -> Result<(), AccessError> {
        match self {
            TenantScope::All => Ok(()),
            TenantScope::Tenant(organization_id) if *organization_id == row_organization_id => {
                Ok(())
            }
            TenantScope::Tenant(_) | TenantScope::Identity => {
                debug!(entity, %row_id, "row outside caller scope");
                Err(AccessError::ScopeMismatch {
                    entity: entity.into(),
                    id: row_id.to_string(),
                })
            }
        }
    }
}

/// Require an allowed decision, yielding its scope.
pub fn require_scope(decision: Decision) -> Result<TenantScope, AccessError> {
    decision
        .scope()
        .ok_or_else(|| AccessError::Denied("action not permitted for role".into()))
}

/// Scope-enforcing wrapper around application mutations.
pub struct ScopedApplications<A: ApplicationRepository> {
    applications: A,
}

impl<A: ApplicationRepository> ScopedApplications<A> {
    pub fn new(applications: A) -> Self {
        Self { applications }
    }

    /// Fetch a single application under the given decision.
    pub async fn get(&self, decision: Decision, id: Uuid) -> HireboardResult<Application> {
        let scope = require_scope(decision)?;
        let head = self
            .applications
            .get_head(id)
            .await?
            .ok_or(AccessError::ScopeMismatch {
                entity: "application".into(),
                id: id.to_string(),
            })?;
        scope.check_row("application", head.id, head.organization_id)?;
        self.applications
            .get_scoped(head.organization_id, id)
            .await
    }

    /// Update an application's status under the given decision.
    ///
    /// The write only proceeds after the fetched row's organization
    /// passes the scope check, and the update query is additionally
    /// filtered by that organization, so an enumerated id belonging to
    /// another tenant leaves the row unmodified.
    pub async fn update_status(
        &self,
        decision: Decision,
        id: Uuid,
        status: ApplicationStatus,
    ) -> HireboardResult<Application> {
        let scope = require_scope(decision)?;
        let head = self
            .applications
            .get_head(id)
            .await?
            .ok_or(AccessError::ScopeMismatch {
                entity: "application".into(),
                id: id.to_string(),
            })?;
        scope.check_row("application", head.id, head.organization_id)?;
        self.applications
            .update_status(head.organization_id, id, status)
            .await
    }
}
