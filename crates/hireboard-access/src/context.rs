//! Per-request context.
//!
//! Session resolution and role lookup happen exactly once per request;
//! handlers read the cached result from this context instead of
//! re-resolving. The context never outlives the request, so a role
//! change is picked up on the next request without any invalidation
//! protocol.

use hireboard_core::error::HireboardResult;
use hireboard_core::models::user::AuthUser;
use hireboard_core::repository::MembershipRepository;
use uuid::Uuid;

use crate::error::AccessError;
use crate::role::{RoleResolver, RoleResult};

/// Identity and resolved role for one inbound request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    user: Option<AuthUser>,
    role: RoleResult,
}

impl RequestContext {
    /// Build the context for a request: one role lookup, cached for
    /// the request's lifetime.
    pub async fn resolve<M: MembershipRepository>(
        user: Option<AuthUser>,
        resolver: &RoleResolver<M>,
    ) -> HireboardResult<Self> {
        let role = resolver.resolve(user.as_ref().map(|u| u.id)).await?;
        Ok(Self { user, role })
    }

    pub fn role(&self) -> &RoleResult {
        &self.role
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// The authenticated user id, or `Unauthenticated`.
    pub fn user_id(&self) -> Result<Uuid, AccessError> {
        self.user
            .as_ref()
            .map(|u| u.id)
            .ok_or(AccessError::Unauthenticated)
    }
}
