//! Integration tests for role resolution against the two membership
//! tables, using in-memory SurrealDB.

use hireboard_access::role::{MemberLevel, RoleResolver, RoleResult};
use hireboard_core::models::membership::{
    AdminRole, CreateAdminUser, CreateOrganizationMember, MemberRole,
};
use hireboard_core::repository::MembershipRepository;
use hireboard_db::repository::SurrealMembershipRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> SurrealMembershipRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    hireboard_db::run_migrations(&db).await.unwrap();
    SurrealMembershipRepository::new(db)
}

#[tokio::test]
async fn no_session_is_unauthenticated() {
    let resolver = RoleResolver::new(setup().await);
    let role = resolver.resolve(None).await.unwrap();
    assert_eq!(role, RoleResult::Unauthenticated);
}

#[tokio::test]
async fn no_membership_is_applicant() {
    let resolver = RoleResolver::new(setup().await);
    let role = resolver.resolve(Some(Uuid::new_v4())).await.unwrap();
    assert_eq!(role, RoleResult::Applicant);
}

#[tokio::test]
async fn primary_org_admin_resolves_to_tenant_admin() {
    let repo = setup().await;
    let user_id = Uuid::new_v4();
    let org_id = Uuid::new_v4();

    repo.create_admin_user(CreateAdminUser {
        user_id,
        role: AdminRole::OrgAdmin,
        organization_id: Some(org_id),
    })
    .await
    .unwrap();

    let resolver = RoleResolver::new(repo);
    let role = resolver.resolve(Some(user_id)).await.unwrap();
    assert_eq!(
        role,
        RoleResult::TenantMember {
            organization_id: org_id,
            level: MemberLevel::Admin,
        }
    );
}

#[tokio::test]
async fn super_admin_ignores_organization_on_row() {
    let repo = setup().await;
    let user_id = Uuid::new_v4();

    // Even if a super-admin row carries an organization id, the
    // resolver must not scope them to it.
    repo.create_admin_user(CreateAdminUser {
        user_id,
        role: AdminRole::SuperAdmin,
        organization_id: Some(Uuid::new_v4()),
    })
    .await
    .unwrap();

    let resolver = RoleResolver::new(repo);
    let role = resolver.resolve(Some(user_id)).await.unwrap();
    assert_eq!(role, RoleResult::PlatformSuperAdmin);
}

#[tokio::test]
async fn malformed_primary_row_falls_through_to_secondary() {
    let repo = setup().await;
    let user_id = Uuid::new_v4();
    let org_id = Uuid::new_v4();

    // OrgAdmin with no organization: unusable, never elevates.
    repo.create_admin_user(CreateAdminUser {
        user_id,
        role: AdminRole::OrgAdmin,
        organization_id: None,
    })
    .await
    .unwrap();

    repo.create_member(CreateOrganizationMember {
        organization_id: org_id,
        user_id,
        role: MemberRole::Staff,
    })
    .await
    .unwrap();

    let resolver = RoleResolver::new(repo);
    let role = resolver.resolve(Some(user_id)).await.unwrap();
    assert_eq!(
        role,
        RoleResult::TenantMember {
            organization_id: org_id,
            level: MemberLevel::Staff,
        }
    );
}

#[tokio::test]
async fn malformed_primary_row_without_secondary_is_applicant() {
    let repo = setup().await;
    let user_id = Uuid::new_v4();

    repo.create_admin_user(CreateAdminUser {
        user_id,
        role: AdminRole::OrgAdmin,
        organization_id: None,
    })
    .await
    .unwrap();

    let resolver = RoleResolver::new(repo);
    let role = resolver.resolve(Some(user_id)).await.unwrap();
    assert_eq!(role, RoleResult::Applicant);
}

#[tokio::test]
async fn secondary_member_resolves_with_mapped_level() {
    let repo = setup().await;
    let user_id = Uuid::new_v4();
    let org_id = Uuid::new_v4();

    repo.create_member(CreateOrganizationMember {
        organization_id: org_id,
        user_id,
        role: MemberRole::Admin,
    })
    .await
    .unwrap();

    let resolver = RoleResolver::new(repo);
    let role = resolver.resolve(Some(user_id)).await.unwrap();
    assert_eq!(
        role,
        RoleResult::TenantMember {
            organization_id: org_id,
            level: MemberLevel::Admin,
        }
    );
}

#[tokio::test]
async fn primary_row_wins_over_secondary() {
    let repo = setup().await;
    let user_id = Uuid::new_v4();
    let primary_org = Uuid::new_v4();
    let secondary_org = Uuid::new_v4();

    repo.create_admin_user(CreateAdminUser {
        user_id,
        role: AdminRole::OrgAdmin,
        organization_id: Some(primary_org),
    })
    .await
    .unwrap();
    repo.create_member(CreateOrganizationMember {
        organization_id: secondary_org,
        user_id,
        role: MemberRole::Staff,
    })
    .await
    .unwrap();

    let resolver = RoleResolver::new(repo);
    let role = resolver.resolve(Some(user_id)).await.unwrap();
    assert_eq!(
        role,
        RoleResult::TenantMember {
            organization_id: primary_org,
            level: MemberLevel::Admin,
        }
    );
}

#[tokio::test]
async fn resolution_is_repeatable() {
    let repo = setup().await;
    let user_id = Uuid::new_v4();
    let org_id = Uuid::new_v4();

    repo.create_admin_user(CreateAdminUser {
        user_id,
        role: AdminRole::OrgAdmin,
        organization_id: Some(org_id),
    })
    .await
    .unwrap();

    let resolver = RoleResolver::new(repo);
    let first = resolver.resolve(Some(user_id)).await.unwrap();
    let second = resolver.resolve(Some(user_id)).await.unwrap();
    assert_eq!(first, second);
}
