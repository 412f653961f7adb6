//! Application intake — the applicant-side submission flow.
//!
//! The owning organization id is always copied from the fetched job
//! row, never taken from the request, and only `Published` postings
//! accept applications.

use hireboard_core::error::HireboardResult;
use hireboard_core::models::application::{Application, CreateApplication};
use hireboard_core::models::job::JobVisibility;
use hireboard_core::models::user::AuthUser;
use hireboard_core::repository::{ApplicationRepository, JobRepository};
use tracing::info;
use uuid::Uuid;

use crate::error::AccessError;

/// Applicant profile snapshot attached to a submission.
#[derive(Debug, Clone)]
pub struct ApplicantProfile {
    pub display_name: String,
    pub resume_path: Option<String>,
    pub cv_path: Option<String>,
}

/// A submission request as received from the applicant.
#[derive(Debug, Clone)]
pub struct SubmitApplication {
    pub job_id: Uuid,
    pub message: String,
    pub include_documents: bool,
}

pub struct IntakeService<J, A>
where
    J: JobRepository,
    A: ApplicationRepository,
{
    jobs: J,
    applications: A,
}

impl<J, A> IntakeService<J, A>
where
    J: JobRepository,
    A: ApplicationRepository,
{
    pub fn new(jobs: J, applications: A) -> Self {
        Self { jobs, applications }
    }

    /// Submit an application on behalf of an authenticated applicant.
    pub async fn submit(
        &self,
        user: &AuthUser,
        profile: &ApplicantProfile,
        input: SubmitApplication,
    ) -> HireboardResult<Application> {
        let message = input.message.trim().to_string();
        if message.is_empty() {
            return Err(AccessError::InvalidInput("applicant message is required".into()).into());
        }

        // If the applicant asked to attach documents, at least one
        // must be uploaded.
        if input.include_documents && profile.resume_path.is_none() && profile.cv_path.is_none() {
            return Err(
                AccessError::InvalidInput("no documents uploaded to include".into()).into(),
            );
        }

        // Applicants see published postings only, so a draft or closed
        // posting is indistinguishable from a missing one.
        let job = self
            .jobs
            .get_visible(input.job_id, JobVisibility::PublishedOnly)
            .await?
            .ok_or(AccessError::ScopeMismatch {
                entity: "job".into(),
                id: input.job_id.to_string(),
            })?;

        let application = self
            .applications
            .create(CreateApplication {
                job_id: job.id,
                organization_id: job.organization_id,
                applicant_user_id: user.id,
                applicant_name: profile.display_name.clone(),
                applicant_email: user.email.clone(),
                applicant_message: message,
                include_documents: input.include_documents,
                resume_path: if input.include_documents {
                    profile.resume_path.clone()
                } else {
                    None
                },
                cv_path: if input.include_documents {
                    profile.cv_path.clone()
                } else {
                    None
                },
            })
            .await?;

        info!(
            application_id = %application.id,
            job_id = %job.id,
            organization_id = %job.organization_id,
            "application submitted"
        );

        Ok(application)
    }
}
