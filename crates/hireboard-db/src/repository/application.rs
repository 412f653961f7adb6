//! SurrealDB implementation of [`ApplicationRepository`].
//!
//! Scoped reads and writes carry `organization_id` in the query, so a
//! caller holding a guessed id outside their scope reads nothing and
//! updates zero rows.

use chrono::{DateTime, Utc};
use hireboard_core::error::HireboardResult;
use hireboard_core::models::application::{
    Application, ApplicationHead, ApplicationStatus, CreateApplication,
};
use hireboard_core::repository::{ApplicationRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ApplicationRow {
    job_id: String,
    organization_id: String,
    applicant_user_id: String,
    applicant_name: String,
    applicant_email: String,
    applicant_message: String,
    status: String,
    include_documents: bool,
    resume_path: Option<String>,
    cv_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApplicationRow {
    fn into_application(self, id: Uuid) -> Result<Application, DbError> {
        Ok(Application {
            id,
            job_id: parse_uuid(&self.job_id, "job")?,
            organization_id: parse_uuid(&self.organization_id, "org")?,
            applicant_user_id: parse_uuid(&self.applicant_user_id, "applicant")?,
            applicant_name: self.applicant_name,
            applicant_email: self.applicant_email,
            applicant_message: self.applicant_message,
            status: parse_status(&self.status)?,
            include_documents: self.include_documents,
            resume_path: self.resume_path,
            cv_path: self.cv_path,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ApplicationRowWithId {
    record_id: String,
    job_id: String,
    organization_id: String,
    applicant_user_id: String,
    applicant_name: String,
    applicant_email: String,
    applicant_message: String,
    status: String,
    include_documents: bool,
    resume_path: Option<String>,
    cv_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApplicationRowWithId {
    fn try_into_application(self) -> Result<Application, DbError> {
        let id = parse_uuid(&self.record_id, "application")?;
        Ok(Application {
            id,
            job_id: parse_uuid(&self.job_id, "job")?,
            organization_id: parse_uuid(&self.organization_id, "org")?,
            applicant_user_id: parse_uuid(&self.applicant_user_id, "applicant")?,
            applicant_name: self.applicant_name,
            applicant_email: self.applicant_email,
            applicant_message: self.applicant_message,
            status: parse_status(&self.status)?,
            include_documents: self.include_documents,
            resume_path: self.resume_path,
            cv_path: self.cv_path,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for the authorization header projection.
#[derive(Debug, SurrealValue)]
struct HeadRow {
    record_id: String,
    organization_id: String,
    applicant_user_id: String,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_uuid(s: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(s).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

fn parse_status(s: &str) -> Result<ApplicationStatus, DbError> {
    match s {
        "New" => Ok(ApplicationStatus::New),
        "InProgress" => Ok(ApplicationStatus::InProgress),
        "Done" => Ok(ApplicationStatus::Done),
        "Rejected" => Ok(ApplicationStatus::Rejected),
        "Archived" => Ok(ApplicationStatus::Archived),
        other => Err(DbError::Decode(format!(
            "unknown application status: {other}"
        ))),
    }
}

fn status_to_string(s: ApplicationStatus) -> &'static str {
    match s {
        ApplicationStatus::New => "New",
        ApplicationStatus::InProgress => "InProgress",
        ApplicationStatus::Done => "Done",
        ApplicationStatus::Rejected => "Rejected",
        ApplicationStatus::Archived => "Archived",
    }
}

/// SurrealDB implementation of the Application repository.
#[derive(Clone)]
pub struct SurrealApplicationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealApplicationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ApplicationRepository for SurrealApplicationRepository<C> {
    async fn create(&self, input: CreateApplication) -> HireboardResult<Application> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('application', $id) SET \
                 job_id = $job_id, \
                 organization_id = $organization_id, \
                 applicant_user_id = $applicant_user_id, \
                 applicant_name = $applicant_name, \
                 applicant_email = $applicant_email, \
                 applicant_message = $applicant_message, \
                 status = $status, \
                 include_documents = $include_documents, \
                 resume_path = $resume_path, \
                 cv_path = $cv_path",
            )
            .bind(("id", id_str.clone()))
            .bind(("job_id", input.job_id.to_string()))
            .bind(("organization_id", input.organization_id.to_string()))
            .bind(("applicant_user_id", input.applicant_user_id.to_string()))
            .bind(("applicant_name", input.applicant_name))
            .bind(("applicant_email", input.applicant_email))
            .bind(("applicant_message", input.applicant_message))
            .bind(("status", status_to_string(ApplicationStatus::New)))
            .bind(("include_documents", input.include_documents))
            .bind(("resume_path", input.resume_path))
            .bind(("cv_path", input.cv_path))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "application".into(),
            id: id_str,
        })?;

        Ok(row.into_application(id)?)
    }

    async fn get_head(&self, id: Uuid) -> HireboardResult<Option<ApplicationHead>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, organization_id, \
                 applicant_user_id \
                 FROM type::record('application', $id)",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<HeadRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(ApplicationHead {
                id: parse_uuid(&row.record_id, "application")?,
                organization_id: parse_uuid(&row.organization_id, "org")?,
                applicant_user_id: parse_uuid(&row.applicant_user_id, "applicant")?,
            })),
            None => Ok(None),
        }
    }

    async fn get_scoped(&self, organization_id: Uuid, id: Uuid) -> HireboardResult<Application> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('application', $id) \
                 WHERE organization_id = $organization_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("organization_id", organization_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "application".into(),
            id: id_str,
        })?;

        Ok(row.into_application(id)?)
    }

    async fn update_status(
        &self,
        organization_id: Uuid,
        id: Uuid,
        status: ApplicationStatus,
    ) -> HireboardResult<Application> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('application', $id) SET \
                 status = $status, updated_at = time::now() \
                 WHERE organization_id = $organization_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("status", status_to_string(status)))
            .bind(("organization_id", organization_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "application".into(),
            id: id_str,
        })?;

        Ok(row.into_application(id)?)
    }

    async fn list_for_org(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
    ) -> HireboardResult<PaginatedResult<Application>> {
        self.list_where("organization_id", organization_id, pagination)
            .await
    }

    async fn list_for_applicant(
        &self,
        applicant_user_id: Uuid,
        pagination: Pagination,
    ) -> HireboardResult<PaginatedResult<Application>> {
        self.list_where("applicant_user_id", applicant_user_id, pagination)
            .await
    }
}

impl<C: Connection> SurrealApplicationRepository<C> {
    /// Shared list implementation; `column` is one of the two fixed
    /// filter columns, never caller input.
    async fn list_where(
        &self,
        column: &'static str,
        value: Uuid,
        pagination: Pagination,
    ) -> HireboardResult<PaginatedResult<Application>> {
        let count_query =
            format!("SELECT count() AS total FROM application WHERE {column} = $value GROUP ALL");
        let mut count_result = self
            .db
            .query(&count_query)
            .bind(("value", value.to_string()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM application \
             WHERE {column} = $value \
             ORDER BY created_at DESC \
             LIMIT $limit START $offset"
        );
        let mut result = self
            .db
            .query(&query)
            .bind(("value", value.to_string()))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_application())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
