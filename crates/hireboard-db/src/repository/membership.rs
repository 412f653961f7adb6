//! SurrealDB implementation of [`MembershipRepository`].
//!
//! Covers both membership tables: `admin_user` (primary, one row per
//! user) and `organization_member` (secondary, many members per
//! organization). Lookups return `None` rather than erroring for
//! unknown or unusable rows so the role resolver can fall through
//! safely.

use chrono::{DateTime, Utc};
use hireboard_core::error::HireboardResult;
use hireboard_core::models::membership::{
    AdminRole, AdminUser, CreateAdminUser, CreateOrganizationMember, MemberRole,
    OrganizationMember,
};
use hireboard_core::repository::MembershipRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::warn;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct AdminUserRow {
    user_id: String,
    role: String,
    organization_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl AdminUserRow {
    fn try_into_admin_user(self) -> Result<AdminUser, DbError> {
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        let role = parse_admin_role(&self.role)?;
        let organization_id = match self.organization_id {
            Some(s) => Some(
                Uuid::parse_str(&s)
                    .map_err(|e| DbError::Decode(format!("invalid org UUID: {e}")))?,
            ),
            None => None,
        };
        Ok(AdminUser {
            user_id,
            role,
            organization_id,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct MemberRow {
    organization_id: String,
    user_id: String,
    role: String,
    created_at: DateTime<Utc>,
}

fn parse_admin_role(s: &str) -> Result<AdminRole, DbError> {
    match s {
        "SuperAdmin" => Ok(AdminRole::SuperAdmin),
        "OrgAdmin" => Ok(AdminRole::OrgAdmin),
        other => Err(DbError::Decode(format!("unknown admin role: {other}"))),
    }
}

fn admin_role_to_string(role: AdminRole) -> &'static str {
    match role {
        AdminRole::SuperAdmin => "SuperAdmin",
        AdminRole::OrgAdmin => "OrgAdmin",
    }
}

fn member_role_to_string(role: MemberRole) -> &'static str {
    match role {
        MemberRole::Admin => "Admin",
        MemberRole::Staff => "Staff",
    }
}

/// SurrealDB implementation of the Membership repository.
#[derive(Clone)]
pub struct SurrealMembershipRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealMembershipRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> MembershipRepository for SurrealMembershipRepository<C> {
    async fn find_admin_user(&self, user_id: Uuid) -> HireboardResult<Option<AdminUser>> {
        let mut result = self
            .db
            .query("SELECT * FROM admin_user WHERE user_id = $user_id")
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminUserRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_admin_user()?)),
            None => Ok(None),
        }
    }

    async fn find_member(&self, user_id: Uuid) -> HireboardResult<Option<OrganizationMember>> {
        let mut result = self
            .db
            .query("SELECT * FROM organization_member WHERE user_id = $user_id")
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MemberRow> = result.take(0).map_err(DbError::from)?;
        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        // A member row with an unrecognized role is no membership,
        // not an error: fall through to Applicant.
        let role = match row.role.as_str() {
            "Admin" => MemberRole::Admin,
            "Staff" => MemberRole::Staff,
            other => {
                warn!(%user_id, role = other, "unknown organization_member role, ignoring row");
                return Ok(None);
            }
        };

        let organization_id = Uuid::parse_str(&row.organization_id)
            .map_err(|e| DbError::Decode(format!("invalid org UUID: {e}")))?;
        let member_user_id = Uuid::parse_str(&row.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;

        Ok(Some(OrganizationMember {
            organization_id,
            user_id: member_user_id,
            role,
            created_at: row.created_at,
        }))
    }

    async fn create_admin_user(&self, input: CreateAdminUser) -> HireboardResult<AdminUser> {
        let user_id_str = input.user_id.to_string();

        let result = self
            .db
            .query(
                "CREATE admin_user SET \
                 user_id = $user_id, role = $role, \
                 organization_id = $organization_id",
            )
            .bind(("user_id", user_id_str.clone()))
            .bind(("role", admin_role_to_string(input.role)))
            .bind((
                "organization_id",
                input.organization_id.map(|id| id.to_string()),
            ))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<AdminUserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "admin_user".into(),
            id: user_id_str,
        })?;

        Ok(row.try_into_admin_user()?)
    }

    async fn delete_admin_user(&self, user_id: Uuid) -> HireboardResult<()> {
        self.db
            .query("DELETE admin_user WHERE user_id = $user_id")
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn create_member(
        &self,
        input: CreateOrganizationMember,
    ) -> HireboardResult<OrganizationMember> {
        let user_id_str = input.user_id.to_string();

        let result = self
            .db
            .query(
                "CREATE organization_member SET \
                 organization_id = $organization_id, \
                 user_id = $user_id, role = $role",
            )
            .bind(("organization_id", input.organization_id.to_string()))
            .bind(("user_id", user_id_str.clone()))
            .bind(("role", member_role_to_string(input.role)))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<MemberRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization_member".into(),
            id: user_id_str,
        })?;

        let organization_id = Uuid::parse_str(&row.organization_id)
            .map_err(|e| DbError::Decode(format!("invalid org UUID: {e}")))?;
        let member_user_id = Uuid::parse_str(&row.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        let role = match row.role.as_str() {
            "Admin" => MemberRole::Admin,
            "Staff" => MemberRole::Staff,
            other => return Err(DbError::Decode(format!("unknown member role: {other}")).into()),
        };

        Ok(OrganizationMember {
            organization_id,
            user_id: member_user_id,
            role,
            created_at: row.created_at,
        })
    }
}
