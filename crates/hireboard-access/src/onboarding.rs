//! Organization onboarding.
//!
//! Creates an organization together with its first admin: the
//! organization row, an account on the external auth platform, and the
//! primary membership row binding the two. There is no cross-table
//! transaction to rely on, so each step compensates on a later step's
//! failure by deleting what was already created, in reverse order.
//! An organization without an admin is a correctness bug, not an
//! acceptable edge case.

use hireboard_core::error::HireboardResult;
use hireboard_core::models::membership::{AdminRole, AdminUser, CreateAdminUser};
use hireboard_core::models::organization::{CreateOrganization, Organization};
use hireboard_core::repository::{AuthDirectory, MembershipRepository, OrganizationRepository};
use tracing::{error, info};

use crate::config::AccessConfig;
use crate::decision::{Action, authorize};
use crate::error::AccessError;
use crate::role::RoleResult;

/// A newly onboarded organization and its first admin binding.
#[derive(Debug, Clone)]
pub struct OnboardedOrganization {
    pub organization: Organization,
    pub admin: AdminUser,
    pub admin_email: String,
}

/// Input for onboarding: the organization plus its first admin's
/// credentials.
#[derive(Debug, Clone)]
pub struct OnboardOrganization {
    pub name: String,
    pub slug: String,
    pub category: Option<String>,
    pub admin_email: String,
    pub admin_password: String,
}

const MIN_ADMIN_PASSWORD_LEN: usize = 8;

pub struct OnboardingService<O, M, D>
where
    O: OrganizationRepository,
    M: MembershipRepository,
    D: AuthDirectory,
{
    organizations: O,
    memberships: M,
    directory: D,
    config: AccessConfig,
}

impl<O, M, D> OnboardingService<O, M, D>
where
    O: OrganizationRepository,
    M: MembershipRepository,
    D: AuthDirectory,
{
    pub fn new(organizations: O, memberships: M, directory: D, config: AccessConfig) -> Self {
        Self {
            organizations,
            memberships,
            directory,
            config,
        }
    }

    /// Create an organization with its first org-admin.
    ///
    /// Only a platform super-admin may invoke this. On partial
    /// failure, already-created rows are deleted in reverse order.
    pub async fn create_organization_with_admin(
        &self,
        caller: &RoleResult,
        input: OnboardOrganization,
    ) -> HireboardResult<OnboardedOrganization> {
        if !authorize(caller, Action::PlatformAdminWrite, None, &self.config).is_allowed() {
            return Err(AccessError::Denied("platform admin required".into()).into());
        }

        let name = input.name.trim().to_string();
        let slug = normalize_slug(&input.slug);
        let admin_email = input.admin_email.trim().to_string();
        if name.is_empty() {
            return Err(AccessError::InvalidInput("name is required".into()).into());
        }
        if slug.is_empty() {
            return Err(AccessError::InvalidInput("slug is required".into()).into());
        }
        if admin_email.is_empty() {
            return Err(AccessError::InvalidInput("admin email is required".into()).into());
        }
        if input.admin_password.len() < MIN_ADMIN_PASSWORD_LEN {
            return Err(AccessError::InvalidInput(format!(
                "admin password must be at least {MIN_ADMIN_PASSWORD_LEN} characters"
            ))
            .into());
        }

        // 1. Organization row.
        let organization = self
            .organizations
            .create(CreateOrganization {
                name,
                slug,
                category: input.category,
            })
            .await?;

        // 2. Auth account. On failure, remove the orphaned
        //    organization before surfacing the error.
        let admin_user_id = match self
            .directory
            .create_account(&admin_email, &input.admin_password)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                self.compensate_organization(&organization).await;
                return Err(e);
            }
        };

        // 3. Primary membership row. On failure, remove the auth
        //    account and then the organization (reverse order).
        let admin = match self
            .memberships
            .create_admin_user(CreateAdminUser {
                user_id: admin_user_id,
                role: AdminRole::OrgAdmin,
                organization_id: Some(organization.id),
            })
            .await
        {
            Ok(admin) => admin,
            Err(e) => {
                if let Err(del) = self.directory.delete_account(admin_user_id).await {
                    error!(%admin_user_id, error = %del, "compensation failed: auth account not deleted");
                }
                self.compensate_organization(&organization).await;
                return Err(e);
            }
        };

        info!(
            organization_id = %organization.id,
            admin_user_id = %admin.user_id,
            "organization onboarded"
        );

        Ok(OnboardedOrganization {
            organization,
            admin,
            admin_email,
        })
    }

    async fn compensate_organization(&self, organization: &Organization) {
        if let Err(del) = self.organizations.delete(organization.id).await {
            error!(
                organization_id = %organization.id,
                error = %del,
                "compensation failed: organization not deleted"
            );
        }
    }
}

/// Lowercase, collapse whitespace to hyphens, strip anything that is
/// not `[a-z0-9-]`, and trim leading/trailing hyphens.
pub fn normalize_slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_hyphen = true; // suppress leading hyphen
    for ch in input.trim().to_lowercase().chars() {
        let mapped = if ch.is_whitespace() { '-' } else { ch };
        match mapped {
            'a'..='z' | '0'..='9' => {
                out.push(mapped);
                last_hyphen = false;
            }
            '-' if !last_hyphen => {
                out.push('-');
                last_hyphen = true;
            }
            _ => {}
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
