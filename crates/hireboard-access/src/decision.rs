//! Access decision — role × action → allow/deny plus tenant scope.
//!
//! The returned scope is what the row-scope enforcer attaches to the
//! underlying query. The scope is always derived from the resolved
//! role (or, for super-admins, from an explicit administrative
//! target), never from a tenant id supplied in the request body.

use uuid::Uuid;

use crate::config::AccessConfig;
use crate::role::{MemberLevel, RoleResult};

/// A requested operation against a named resource class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadOwnApplicantData,
    ReadTenantJobs,
    WriteTenantJobs,
    ReadTenantApplications,
    WriteTenantApplications,
    ReadConversation,
    WriteConversation,
    PlatformAdminRead,
    PlatformAdminWrite,
}

impl Action {
    fn is_platform_admin(self) -> bool {
        matches!(self, Action::PlatformAdminRead | Action::PlatformAdminWrite)
    }

    fn is_tenant_write(self) -> bool {
        matches!(self, Action::WriteTenantJobs | Action::WriteTenantApplications)
    }

    fn is_tenant_read(self) -> bool {
        matches!(self, Action::ReadTenantJobs | Action::ReadTenantApplications)
    }
}

/// The tenant filter a permitted operation must run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// No filter. Only platform-admin reads/writes get this.
    All,
    /// Equality filter on the organization id column.
    Tenant(Uuid),
    /// No tenant reach at all. Identity-bound allows (an applicant
    /// acting on their own data or conversations) carry this; the
    /// per-row check happens in the conversation and files gates
    /// against the applicant id, and the tenant enforcer fails closed
    /// on it.
    Identity,
}

/// Outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow(TenantScope),
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }

    /// The scope of an allowed decision, or `None` when denied.
    pub fn scope(&self) -> Option<TenantScope> {
        match self {
            Decision::Allow(scope) => Some(*scope),
            Decision::Deny => None,
        }
    }
}

/// Decide whether `role` may perform `action`.
///
/// `admin_target` is only meaningful for a `PlatformSuperAdmin`
/// performing a tenant-scoped action: it names the organization being
/// administered. Without it, a super-admin's tenant-scoped action is
/// denied — there is no implicit cross-tenant write scope.
///
/// Conversation actions decided here cover the role half of the check
/// only; the per-application OR-gate (owning tenant member, or the
/// application's own applicant) lives in [`ConversationGate`], which
/// loads the application row.
///
/// [`ConversationGate`]: crate::conversation::ConversationGate
pub fn authorize(
    role: &RoleResult,
    action: Action,
    admin_target: Option<Uuid>,
    config: &AccessConfig,
) -> Decision {
    match role {
        RoleResult::Unauthenticated => Decision::Deny,

        RoleResult::PlatformSuperAdmin => {
            if action.is_platform_admin() {
                return Decision::Allow(TenantScope::All);
            }
            // Tenant-scoped actions require an explicit target; the
            // scope pins to it and is never inferred.
            match admin_target {
                Some(organization_id) => Decision::Allow(TenantScope::Tenant(organization_id)),
                None => Decision::Deny,
            }
        }

        RoleResult::TenantMember {
            organization_id,
            level,
        } => {
            if action.is_platform_admin() || action == Action::ReadOwnApplicantData {
                return Decision::Deny;
            }
            let scope = TenantScope::Tenant(*organization_id);
            match action {
                _ if action.is_tenant_read() => Decision::Allow(scope),
                Action::ReadConversation | Action::WriteConversation => Decision::Allow(scope),
                _ if action.is_tenant_write() => match level {
                    MemberLevel::Admin => Decision::Allow(scope),
                    MemberLevel::Staff if config.staff_write_enabled => Decision::Allow(scope),
                    MemberLevel::Staff => Decision::Deny,
                },
                _ => Decision::Deny,
            }
        }

        RoleResult::Applicant => match action {
            // Conversation access for applicants is identity-bound,
            // not tenant-bound; the gate checks the application's
            // applicant id against the caller.
            Action::ReadOwnApplicantData
            | Action::ReadConversation
            | Action::WriteConversation => Decision::Allow(TenantScope::Identity),
            _ => Decision::Deny,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn unauthenticated_denied_everything() {
        let config = AccessConfig::default();
        for action in [
            Action::ReadOwnApplicantData,
            Action::ReadTenantJobs,
            Action::WriteTenantJobs,
            Action::ReadTenantApplications,
            Action::WriteTenantApplications,
            Action::ReadConversation,
            Action::WriteConversation,
            Action::PlatformAdminRead,
            Action::PlatformAdminWrite,
        ] {
            assert_eq!(
                authorize(&RoleResult::Unauthenticated, action, None, &config),
                Decision::Deny,
                "action {action:?} should be denied"
            );
        }
    }

    #[test]
    fn tenant_admin_pinned_to_own_org() {
        let config = AccessConfig::default();
        let organization_id = org();
        let role = RoleResult::TenantMember {
            organization_id,
            level: MemberLevel::Admin,
        };

        // Even a stray admin target must not move the scope.
        let decision = authorize(&role, Action::WriteTenantJobs, Some(org()), &config);
        assert_eq!(decision, Decision::Allow(TenantScope::Tenant(organization_id)));
    }

    #[test]
    fn tenant_admin_denied_platform_admin() {
        let config = AccessConfig::default();
        let role = RoleResult::TenantMember {
            organization_id: org(),
            level: MemberLevel::Admin,
        };
        assert_eq!(
            authorize(&role, Action::PlatformAdminRead, None, &config),
            Decision::Deny
        );
    }

    #[test]
    fn staff_write_denied_by_default() {
        let config = AccessConfig::default();
        let role = RoleResult::TenantMember {
            organization_id: org(),
            level: MemberLevel::Staff,
        };
        assert_eq!(
            authorize(&role, Action::WriteTenantJobs, None, &config),
            Decision::Deny
        );
        assert_eq!(
            authorize(&role, Action::WriteTenantApplications, None, &config),
            Decision::Deny
        );
    }

    #[test]
    fn staff_write_allowed_when_policy_grants_it() {
        let config = AccessConfig {
            staff_write_enabled: true,
        };
        let organization_id = org();
        let role = RoleResult::TenantMember {
            organization_id,
            level: MemberLevel::Staff,
        };
        assert_eq!(
            authorize(&role, Action::WriteTenantJobs, None, &config),
            Decision::Allow(TenantScope::Tenant(organization_id))
        );
    }

    #[test]
    fn staff_reads_and_conversation_always_allowed() {
        let config = AccessConfig::default();
        let organization_id = org();
        let role = RoleResult::TenantMember {
            organization_id,
            level: MemberLevel::Staff,
        };
        for action in [
            Action::ReadTenantJobs,
            Action::ReadTenantApplications,
            Action::ReadConversation,
            Action::WriteConversation,
        ] {
            assert_eq!(
                authorize(&role, action, None, &config),
                Decision::Allow(TenantScope::Tenant(organization_id)),
                "action {action:?} should be allowed for staff"
            );
        }
    }

    #[test]
    fn super_admin_gets_all_scope_on_platform_actions() {
        let config = AccessConfig::default();
        assert_eq!(
            authorize(
                &RoleResult::PlatformSuperAdmin,
                Action::PlatformAdminRead,
                None,
                &config
            ),
            Decision::Allow(TenantScope::All)
        );
    }

    #[test]
    fn super_admin_tenant_write_requires_explicit_target() {
        let config = AccessConfig::default();

        // No target: denied, never an implicit ALL write.
        assert_eq!(
            authorize(
                &RoleResult::PlatformSuperAdmin,
                Action::WriteTenantJobs,
                None,
                &config
            ),
            Decision::Deny
        );

        // Explicit target: pinned to that organization.
        let target = org();
        assert_eq!(
            authorize(
                &RoleResult::PlatformSuperAdmin,
                Action::WriteTenantJobs,
                Some(target),
                &config
            ),
            Decision::Allow(TenantScope::Tenant(target))
        );
    }

    #[test]
    fn applicant_denied_tenant_actions() {
        let config = AccessConfig::default();
        for action in [
            Action::ReadTenantJobs,
            Action::WriteTenantJobs,
            Action::ReadTenantApplications,
            Action::WriteTenantApplications,
            Action::PlatformAdminRead,
            Action::PlatformAdminWrite,
        ] {
            assert_eq!(
                authorize(&RoleResult::Applicant, action, None, &config),
                Decision::Deny,
                "action {action:?} should be denied for applicants"
            );
        }
    }

    #[test]
    fn applicant_allowed_own_data_and_conversation() {
        let config = AccessConfig::default();
        for action in [
            Action::ReadOwnApplicantData,
            Action::ReadConversation,
            Action::WriteConversation,
        ] {
            assert!(
                authorize(&RoleResult::Applicant, action, None, &config).is_allowed(),
                "action {action:?} should be allowed for applicants"
            );
        }
    }

    #[test]
    fn applicant_allows_are_identity_bound_not_unfiltered() {
        let config = AccessConfig::default();
        for action in [
            Action::ReadOwnApplicantData,
            Action::ReadConversation,
            Action::WriteConversation,
        ] {
            let decision = authorize(&RoleResult::Applicant, action, None, &config);
            assert_eq!(
                decision,
                Decision::Allow(TenantScope::Identity),
                "an applicant allow must never carry the platform-wide scope"
            );
        }
    }
}
