//! Integration tests for Organization and Membership repository
//! implementations using in-memory SurrealDB.

use hireboard_core::error::HireboardError;
use hireboard_core::models::membership::{
    AdminRole, CreateAdminUser, CreateOrganizationMember, MemberRole,
};
use hireboard_core::models::organization::CreateOrganization;
use hireboard_core::repository::{MembershipRepository, OrganizationRepository, Pagination};
use hireboard_db::repository::{SurrealMembershipRepository, SurrealOrganizationRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    hireboard_db::run_migrations(&db).await.unwrap();
    db
}

// -----------------------------------------------------------------------
// Organization tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_organization() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    let org = repo
        .create(CreateOrganization {
            name: "ACME Robotics".into(),
            slug: "acme-robotics".into(),
            category: Some("manufacturing".into()),
        })
        .await
        .unwrap();

    assert_eq!(org.name, "ACME Robotics");
    assert_eq!(org.slug, "acme-robotics");

    let fetched = repo.get_by_id(org.id).await.unwrap();
    assert_eq!(fetched.id, org.id);
    assert_eq!(fetched.name, org.name);
    assert_eq!(fetched.category.as_deref(), Some("manufacturing"));
}

#[tokio::test]
async fn get_organization_by_slug() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    let org = repo
        .create(CreateOrganization {
            name: "Slug Test".into(),
            slug: "slug-test".into(),
            category: None,
        })
        .await
        .unwrap();

    let fetched = repo.get_by_slug("slug-test").await.unwrap();
    assert_eq!(fetched.id, org.id);

    let err = repo.get_by_slug("no-such-slug").await.unwrap_err();
    assert!(matches!(err, HireboardError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_slug_rejected() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    repo.create(CreateOrganization {
        name: "First".into(),
        slug: "taken".into(),
        category: None,
    })
    .await
    .unwrap();

    let result = repo
        .create(CreateOrganization {
            name: "Second".into(),
            slug: "taken".into(),
            category: None,
        })
        .await;

    assert!(result.is_err(), "unique slug index should reject duplicate");
}

#[tokio::test]
async fn list_and_delete_organizations() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    for i in 0..3 {
        repo.create(CreateOrganization {
            name: format!("Org {i}"),
            slug: format!("org-{i}"),
            category: None,
        })
        .await
        .unwrap();
    }

    let page = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 3);

    let victim = page.items[0].id;
    repo.delete(victim).await.unwrap();

    let after = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(after.total, 2);
    assert!(after.items.iter().all(|o| o.id != victim));
}

// -----------------------------------------------------------------------
// Membership tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn admin_user_roundtrip() {
    let db = setup().await;
    let repo = SurrealMembershipRepository::new(db);

    let user_id = Uuid::new_v4();
    let org_id = Uuid::new_v4();

    assert!(repo.find_admin_user(user_id).await.unwrap().is_none());

    let created = repo
        .create_admin_user(CreateAdminUser {
            user_id,
            role: AdminRole::OrgAdmin,
            organization_id: Some(org_id),
        })
        .await
        .unwrap();
    assert_eq!(created.user_id, user_id);
    assert_eq!(created.role, AdminRole::OrgAdmin);
    assert_eq!(created.organization_id, Some(org_id));

    let found = repo.find_admin_user(user_id).await.unwrap().unwrap();
    assert_eq!(found.user_id, user_id);
    assert_eq!(found.organization_id, Some(org_id));

    repo.delete_admin_user(user_id).await.unwrap();
    assert!(repo.find_admin_user(user_id).await.unwrap().is_none());
}

#[tokio::test]
async fn admin_user_unique_per_user() {
    let db = setup().await;
    let repo = SurrealMembershipRepository::new(db);

    let user_id = Uuid::new_v4();
    repo.create_admin_user(CreateAdminUser {
        user_id,
        role: AdminRole::SuperAdmin,
        organization_id: None,
    })
    .await
    .unwrap();

    let dup = repo
        .create_admin_user(CreateAdminUser {
            user_id,
            role: AdminRole::OrgAdmin,
            organization_id: Some(Uuid::new_v4()),
        })
        .await;

    assert!(dup.is_err(), "one primary membership row per user");
}

#[tokio::test]
async fn organization_member_roundtrip() {
    let db = setup().await;
    let repo = SurrealMembershipRepository::new(db);

    let user_id = Uuid::new_v4();
    let org_id = Uuid::new_v4();

    assert!(repo.find_member(user_id).await.unwrap().is_none());

    let member = repo
        .create_member(CreateOrganizationMember {
            organization_id: org_id,
            user_id,
            role: MemberRole::Staff,
        })
        .await
        .unwrap();
    assert_eq!(member.role, MemberRole::Staff);

    let found = repo.find_member(user_id).await.unwrap().unwrap();
    assert_eq!(found.organization_id, org_id);
    assert_eq!(found.user_id, user_id);
    assert_eq!(found.role, MemberRole::Staff);
}
