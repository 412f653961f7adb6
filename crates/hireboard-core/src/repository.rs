//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant-scoped repositories
//! take the resolved `organization_id` as an explicit parameter so the
//! scope filter is part of the query itself, not a post-hoc check.

use uuid::Uuid;

use crate::error::HireboardResult;
use crate::models::{
    application::{Application, ApplicationHead, ApplicationStatus, CreateApplication},
    conversation::{Conversation, Message, Sender},
    job::{CreateJob, Job, JobVisibility, UpdateJob},
    membership::{AdminUser, CreateAdminUser, CreateOrganizationMember, OrganizationMember},
    organization::{CreateOrganization, Organization},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Organizations (global scope)
// ---------------------------------------------------------------------------

pub trait OrganizationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = HireboardResult<Organization>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = HireboardResult<Organization>> + Send;
    fn get_by_slug(&self, slug: &str)
    -> impl Future<Output = HireboardResult<Organization>> + Send;
    /// Hard delete. Used only by onboarding compensation.
    fn delete(&self, id: Uuid) -> impl Future<Output = HireboardResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = HireboardResult<PaginatedResult<Organization>>> + Send;
}

// ---------------------------------------------------------------------------
// Membership (read path for role resolution, write path for onboarding)
// ---------------------------------------------------------------------------

pub trait MembershipRepository: Send + Sync {
    /// Look up the primary membership row for a user, if any.
    fn find_admin_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = HireboardResult<Option<AdminUser>>> + Send;
    /// Look up a secondary membership row for a user, if any.
    fn find_member(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = HireboardResult<Option<OrganizationMember>>> + Send;
    fn create_admin_user(
        &self,
        input: CreateAdminUser,
    ) -> impl Future<Output = HireboardResult<AdminUser>> + Send;
    /// Hard delete. Used only by onboarding compensation.
    fn delete_admin_user(&self, user_id: Uuid) -> impl Future<Output = HireboardResult<()>> + Send;
    /// Add a staff/admin member to an organization (team invites).
    fn create_member(
        &self,
        input: CreateOrganizationMember,
    ) -> impl Future<Output = HireboardResult<OrganizationMember>> + Send;
}

// ---------------------------------------------------------------------------
// Tenant-scoped repositories
// ---------------------------------------------------------------------------

pub trait JobRepository: Send + Sync {
    fn create(&self, input: CreateJob) -> impl Future<Output = HireboardResult<Job>> + Send;
    /// Fetch a single posting subject to the reader's visibility.
    /// A posting outside the visibility yields `None`, not an error,
    /// so callers surface it as not-found.
    fn get_visible(
        &self,
        id: Uuid,
        visibility: JobVisibility,
    ) -> impl Future<Output = HireboardResult<Option<Job>>> + Send;
    /// Scoped write: the update query carries the organization filter.
    fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        input: UpdateJob,
    ) -> impl Future<Output = HireboardResult<Job>> + Send;
    fn list(
        &self,
        visibility: JobVisibility,
        pagination: Pagination,
    ) -> impl Future<Output = HireboardResult<PaginatedResult<Job>>> + Send;
}

pub trait ApplicationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateApplication,
    ) -> impl Future<Output = HireboardResult<Application>> + Send;
    /// The authorization header row: owning organization + applicant.
    /// Unknown id yields `None`; callers must fail closed on it.
    fn get_head(
        &self,
        id: Uuid,
    ) -> impl Future<Output = HireboardResult<Option<ApplicationHead>>> + Send;
    fn get_scoped(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = HireboardResult<Application>> + Send;
    /// Scoped write: the update query carries the organization filter,
    /// so a guessed id outside the scope updates zero rows.
    fn update_status(
        &self,
        organization_id: Uuid,
        id: Uuid,
        status: ApplicationStatus,
    ) -> impl Future<Output = HireboardResult<Application>> + Send;
    fn list_for_org(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = HireboardResult<PaginatedResult<Application>>> + Send;
    fn list_for_applicant(
        &self,
        applicant_user_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = HireboardResult<PaginatedResult<Application>>> + Send;
}

pub trait ConversationRepository: Send + Sync {
    /// Fetch the conversation for an application, creating it on first
    /// access. Idempotent.
    fn get_or_create(
        &self,
        head: ApplicationHead,
    ) -> impl Future<Output = HireboardResult<Conversation>> + Send;
    fn append_message(
        &self,
        conversation_id: Uuid,
        sender: Sender,
        sender_user_id: Uuid,
        body: String,
    ) -> impl Future<Output = HireboardResult<Message>> + Send;
    /// Messages ordered by creation time, oldest first.
    fn list_messages(
        &self,
        conversation_id: Uuid,
    ) -> impl Future<Output = HireboardResult<Vec<Message>>> + Send;
}

// ---------------------------------------------------------------------------
// External auth collaborator seam
// ---------------------------------------------------------------------------

/// Account management on the external auth platform. Implemented by
/// the deployment's auth integration; the core only calls it during
/// organization onboarding (and its compensation path).
pub trait AuthDirectory: Send + Sync {
    fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = HireboardResult<Uuid>> + Send;
    fn delete_account(&self, user_id: Uuid) -> impl Future<Output = HireboardResult<()>> + Send;
}
