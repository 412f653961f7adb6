//! Job visibility tests: who can see draft, published, and closed
//! postings.

use hireboard_core::models::job::{CreateJob, JobStatus, JobVisibility, UpdateJob};
use hireboard_core::repository::{JobRepository, Pagination};
use hireboard_db::repository::SurrealJobRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    hireboard_db::run_migrations(&db).await.unwrap();
    db
}

fn job_input(org: Uuid, title: &str, status: JobStatus) -> CreateJob {
    CreateJob {
        organization_id: org,
        title: title.into(),
        description: "desc".into(),
        location: None,
        employment_type: Some("full_time".into()),
        status,
    }
}

#[tokio::test]
async fn draft_job_hidden_from_public_readers() {
    let db = setup().await;
    let repo = SurrealJobRepository::new(db);
    let org = Uuid::new_v4();

    let draft = repo
        .create(job_input(org, "Stealth role", JobStatus::Draft))
        .await
        .unwrap();

    // Anonymous/applicant readers: indistinguishable from missing.
    let hidden = repo
        .get_visible(draft.id, JobVisibility::PublishedOnly)
        .await
        .unwrap();
    assert!(hidden.is_none());

    // Owning tenant sees it.
    let own = repo
        .get_visible(draft.id, JobVisibility::Tenant(org))
        .await
        .unwrap();
    assert_eq!(own.unwrap().id, draft.id);

    // A different tenant does not.
    let foreign = repo
        .get_visible(draft.id, JobVisibility::Tenant(Uuid::new_v4()))
        .await
        .unwrap();
    assert!(foreign.is_none());

    // Platform admin sees everything.
    let all = repo.get_visible(draft.id, JobVisibility::All).await.unwrap();
    assert!(all.is_some());
}

#[tokio::test]
async fn published_job_visible_to_everyone() {
    let db = setup().await;
    let repo = SurrealJobRepository::new(db);
    let org = Uuid::new_v4();

    let job = repo
        .create(job_input(org, "Open role", JobStatus::Published))
        .await
        .unwrap();

    for visibility in [
        JobVisibility::PublishedOnly,
        JobVisibility::Tenant(Uuid::new_v4()),
        JobVisibility::All,
    ] {
        let found = repo.get_visible(job.id, visibility).await.unwrap();
        assert!(found.is_some(), "{visibility:?} should see published job");
    }
}

#[tokio::test]
async fn list_respects_visibility() {
    let db = setup().await;
    let repo = SurrealJobRepository::new(db);
    let org_a = Uuid::new_v4();
    let org_b = Uuid::new_v4();

    repo.create(job_input(org_a, "A published", JobStatus::Published))
        .await
        .unwrap();
    repo.create(job_input(org_a, "A draft", JobStatus::Draft))
        .await
        .unwrap();
    repo.create(job_input(org_b, "B closed", JobStatus::Closed))
        .await
        .unwrap();

    let public = repo
        .list(JobVisibility::PublishedOnly, Pagination::default())
        .await
        .unwrap();
    assert_eq!(public.total, 1);

    // Org A members: their own two plus any published (already theirs).
    let org_a_view = repo
        .list(JobVisibility::Tenant(org_a), Pagination::default())
        .await
        .unwrap();
    assert_eq!(org_a_view.total, 2);

    // Org B members: their closed posting plus A's published one.
    let org_b_view = repo
        .list(JobVisibility::Tenant(org_b), Pagination::default())
        .await
        .unwrap();
    assert_eq!(org_b_view.total, 2);

    let admin_view = repo
        .list(JobVisibility::All, Pagination::default())
        .await
        .unwrap();
    assert_eq!(admin_view.total, 3);
}

#[tokio::test]
async fn update_is_tenant_scoped() {
    let db = setup().await;
    let repo = SurrealJobRepository::new(db);
    let org_a = Uuid::new_v4();
    let org_b = Uuid::new_v4();

    let job = repo
        .create(job_input(org_a, "Role", JobStatus::Draft))
        .await
        .unwrap();

    // Update under the wrong organization touches zero rows.
    let wrong = repo
        .update(
            org_b,
            job.id,
            UpdateJob {
                status: Some(JobStatus::Published),
                ..Default::default()
            },
        )
        .await;
    assert!(wrong.is_err());

    let untouched = repo
        .get_visible(job.id, JobVisibility::Tenant(org_a))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.status, JobStatus::Draft);

    // Correct organization succeeds.
    let updated = repo
        .update(
            org_a,
            job.id,
            UpdateJob {
                status: Some(JobStatus::Published),
                title: Some("Role (hiring!)".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, JobStatus::Published);
    assert_eq!(updated.title, "Role (hiring!)");
}
