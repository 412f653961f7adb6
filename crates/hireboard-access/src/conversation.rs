//! Conversation access gate.
//!
//! Conversation access is an OR of two independent authorization
//! paths, not a single role check: the caller is a member (at least
//! staff) of the application's owning organization, or the caller is
//! the application's own applicant. Both paths are evaluated against
//! the fetched application row; an unknown application id fails
//! closed.

use hireboard_core::error::HireboardResult;
use hireboard_core::models::application::ApplicationHead;
use hireboard_core::models::conversation::{Conversation, Message, Sender};
use hireboard_core::repository::{ApplicationRepository, ConversationRepository};
use tracing::debug;
use uuid::Uuid;

use crate::error::AccessError;
use crate::role::RoleResult;

/// A granted conversation access: which sender class the caller
/// participates as, plus the application row the grant was checked
/// against.
#[derive(Debug, Clone, Copy)]
pub struct ConversationAccess {
    pub head: ApplicationHead,
    pub sender: Sender,
}

/// Authorizes and services conversation reads/writes.
pub struct ConversationGate<A, C>
where
    A: ApplicationRepository,
    C: ConversationRepository,
{
    applications: A,
    conversations: C,
}

impl<A, C> ConversationGate<A, C>
where
    A: ApplicationRepository,
    C: ConversationRepository,
{
    pub fn new(applications: A, conversations: C) -> Self {
        Self {
            applications,
            conversations,
        }
    }

    /// Evaluate both access paths for `application_id`.
    ///
    /// Fails closed: if the application row cannot be loaded the
    /// outcome is a not-found denial, regardless of the caller's role.
    pub async fn authorize(
        &self,
        role: &RoleResult,
        user_id: Uuid,
        application_id: Uuid,
    ) -> HireboardResult<ConversationAccess> {
        let head = self
            .applications
            .get_head(application_id)
            .await?
            .ok_or(AccessError::ScopeMismatch {
                entity: "application".into(),
                id: application_id.to_string(),
            })?;

        // Path 1: member of the owning organization (admin or staff).
        let is_company = matches!(
            role,
            RoleResult::TenantMember { organization_id, .. }
                if *organization_id == head.organization_id
        );

        // Path 2: the application's own applicant, by identity
        // equality, independent of role.
        let is_applicant = head.applicant_user_id == user_id;

        if is_company {
            Ok(ConversationAccess {
                head,
                sender: Sender::Company,
            })
        } else if is_applicant {
            Ok(ConversationAccess {
                head,
                sender: Sender::Applicant,
            })
        } else {
            debug!(%application_id, %user_id, "conversation access denied");
            Err(AccessError::Denied("not a participant in this conversation".into()).into())
        }
    }

    /// Open the conversation for an application: authorize, lazily
    /// create the conversation on first access, and return it with its
    /// messages oldest-first.
    pub async fn open(
        &self,
        role: &RoleResult,
        user_id: Uuid,
        application_id: Uuid,
    ) -> HireboardResult<(Conversation, Vec<Message>)> {
        let access = self.authorize(role, user_id, application_id).await?;
        let conversation = self.conversations.get_or_create(access.head).await?;
        let messages = self.conversations.list_messages(conversation.id).await?;
        Ok((conversation, messages))
    }

    /// Post a message into an application's conversation.
    pub async fn post(
        &self,
        role: &RoleResult,
        user_id: Uuid,
        application_id: Uuid,
        body: String,
    ) -> HireboardResult<Message> {
        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(AccessError::InvalidInput("message body is required".into()).into());
        }
        let access = self.authorize(role, user_id, application_id).await?;
        let conversation = self.conversations.get_or_create(access.head).await?;
        self.conversations
            .append_message(conversation.id, access.sender, user_id, body)
            .await
    }
}
