//! SurrealDB implementation of [`JobRepository`].
//!
//! Visibility is part of the query: anonymous and applicant readers
//! only ever select `Published` rows, members additionally select
//! their own organization's rows, and only the platform super-admin
//! path selects unfiltered.

use chrono::{DateTime, Utc};
use hireboard_core::error::HireboardResult;
use hireboard_core::models::job::{CreateJob, Job, JobStatus, JobVisibility, UpdateJob};
use hireboard_core::repository::{JobRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct JobRow {
    organization_id: String,
    title: String,
    description: String,
    location: Option<String>,
    employment_type: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl JobRow {
    fn into_job(self, id: Uuid) -> Result<Job, DbError> {
        let organization_id = Uuid::parse_str(&self.organization_id)
            .map_err(|e| DbError::Decode(format!("invalid org UUID: {e}")))?;
        Ok(Job {
            id,
            organization_id,
            title: self.title,
            description: self.description,
            location: self.location,
            employment_type: self.employment_type,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct JobRowWithId {
    record_id: String,
    organization_id: String,
    title: String,
    description: String,
    location: Option<String>,
    employment_type: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl JobRowWithId {
    fn try_into_job(self) -> Result<Job, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let organization_id = Uuid::parse_str(&self.organization_id)
            .map_err(|e| DbError::Decode(format!("invalid org UUID: {e}")))?;
        Ok(Job {
            id,
            organization_id,
            title: self.title,
            description: self.description,
            location: self.location,
            employment_type: self.employment_type,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_status(s: &str) -> Result<JobStatus, DbError> {
    match s {
        "Draft" => Ok(JobStatus::Draft),
        "Published" => Ok(JobStatus::Published),
        "Closed" => Ok(JobStatus::Closed),
        other => Err(DbError::Decode(format!("unknown job status: {other}"))),
    }
}

fn status_to_string(s: JobStatus) -> &'static str {
    match s {
        JobStatus::Draft => "Draft",
        JobStatus::Published => "Published",
        JobStatus::Closed => "Closed",
    }
}

/// The WHERE clause fragment for a visibility, plus whether it binds
/// `$viewer_org`.
fn visibility_clause(visibility: JobVisibility) -> (&'static str, Option<Uuid>) {
    match visibility {
        JobVisibility::PublishedOnly => ("status = 'Published'", None),
        JobVisibility::Tenant(org) => (
            "(status = 'Published' OR organization_id = $viewer_org)",
            Some(org),
        ),
        JobVisibility::All => ("true", None),
    }
}

/// SurrealDB implementation of the Job repository.
#[derive(Clone)]
pub struct SurrealJobRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealJobRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> JobRepository for SurrealJobRepository<C> {
    async fn create(&self, input: CreateJob) -> HireboardResult<Job> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('job', $id) SET \
                 organization_id = $organization_id, \
                 title = $title, description = $description, \
                 location = $location, \
                 employment_type = $employment_type, \
                 status = $status",
            )
            .bind(("id", id_str.clone()))
            .bind(("organization_id", input.organization_id.to_string()))
            .bind(("title", input.title))
            .bind(("description", input.description))
            .bind(("location", input.location))
            .bind(("employment_type", input.employment_type))
            .bind(("status", status_to_string(input.status)))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<JobRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "job".into(),
            id: id_str,
        })?;

        Ok(row.into_job(id)?)
    }

    async fn get_visible(
        &self,
        id: Uuid,
        visibility: JobVisibility,
    ) -> HireboardResult<Option<Job>> {
        let (clause, viewer_org) = visibility_clause(visibility);
        let query = format!("SELECT * FROM type::record('job', $id) WHERE {clause}");

        let mut builder = self.db.query(&query).bind(("id", id.to_string()));
        if let Some(org) = viewer_org {
            builder = builder.bind(("viewer_org", org.to_string()));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<JobRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_job(id)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, organization_id: Uuid, id: Uuid, input: UpdateJob) -> HireboardResult<Job> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.location.is_some() {
            sets.push("location = $location");
        }
        if input.employment_type.is_some() {
            sets.push("employment_type = $employment_type");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        sets.push("updated_at = time::now()");

        // The organization filter is part of the write itself: a
        // guessed id belonging to another tenant updates zero rows.
        let query = format!(
            "UPDATE type::record('job', $id) SET {} \
             WHERE organization_id = $organization_id",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("organization_id", organization_id.to_string()));

        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(location) = input.location {
            builder = builder.bind(("location", location));
        }
        if let Some(employment_type) = input.employment_type {
            builder = builder.bind(("employment_type", employment_type));
        }
        if let Some(status) = input.status {
            builder = builder.bind(("status", status_to_string(status)));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<JobRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "job".into(),
            id: id_str,
        })?;

        Ok(row.into_job(id)?)
    }

    async fn list(
        &self,
        visibility: JobVisibility,
        pagination: Pagination,
    ) -> HireboardResult<PaginatedResult<Job>> {
        let (clause, viewer_org) = visibility_clause(visibility);

        let count_query = format!("SELECT count() AS total FROM job WHERE {clause} GROUP ALL");
        let mut count_builder = self.db.query(&count_query);
        if let Some(org) = viewer_org {
            count_builder = count_builder.bind(("viewer_org", org.to_string()));
        }
        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM job \
             WHERE {clause} \
             ORDER BY created_at DESC \
             LIMIT $limit START $offset"
        );
        let mut builder = self
            .db
            .query(&query)
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));
        if let Some(org) = viewer_org {
            builder = builder.bind(("viewer_org", org.to_string()));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<JobRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_job())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

}
