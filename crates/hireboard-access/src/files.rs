//! Document signed-URL gate.
//!
//! The object-storage collaborator generates the time-limited URL;
//! this module only decides whether one may be issued for a given
//! caller and application document. Same two-path rule as
//! conversations: owning-tenant member or the application's own
//! applicant.

use hireboard_core::models::application::ApplicationHead;
use uuid::Uuid;

use crate::role::RoleResult;

/// Which uploaded document is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    Cv,
}

/// Whether a signed URL may be issued for `kind` on the application
/// identified by `head`, to the caller `(role, user_id)`.
pub fn may_issue_document_url(
    role: &RoleResult,
    user_id: Uuid,
    head: &ApplicationHead,
    _kind: DocumentKind,
) -> bool {
    let is_company = matches!(
        role,
        RoleResult::TenantMember { organization_id, .. }
            if *organization_id == head.organization_id
    );
    is_company || head.applicant_user_id == user_id
}
