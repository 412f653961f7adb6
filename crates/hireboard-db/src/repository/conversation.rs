//! SurrealDB implementation of [`ConversationRepository`].
//!
//! Conversations are created lazily on first access. The unique index
//! on `application_id` makes concurrent first-access creation safe:
//! the loser of the race re-reads the winner's row.

use chrono::{DateTime, Utc};
use hireboard_core::error::HireboardResult;
use hireboard_core::models::application::ApplicationHead;
use hireboard_core::models::conversation::{Conversation, Message, Sender};
use hireboard_core::repository::ConversationRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ConversationRowWithId {
    record_id: String,
    application_id: String,
    organization_id: String,
    applicant_user_id: String,
    created_at: DateTime<Utc>,
}

impl ConversationRowWithId {
    fn try_into_conversation(self) -> Result<Conversation, DbError> {
        Ok(Conversation {
            id: parse_uuid(&self.record_id, "conversation")?,
            application_id: parse_uuid(&self.application_id, "application")?,
            organization_id: parse_uuid(&self.organization_id, "org")?,
            applicant_user_id: parse_uuid(&self.applicant_user_id, "applicant")?,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct MessageRowWithId {
    record_id: String,
    conversation_id: String,
    sender: String,
    sender_user_id: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl MessageRowWithId {
    fn try_into_message(self) -> Result<Message, DbError> {
        Ok(Message {
            id: parse_uuid(&self.record_id, "message")?,
            conversation_id: parse_uuid(&self.conversation_id, "conversation")?,
            sender: parse_sender(&self.sender)?,
            sender_user_id: parse_uuid(&self.sender_user_id, "sender")?,
            body: self.body,
            created_at: self.created_at,
        })
    }
}

fn parse_uuid(s: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(s).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

fn parse_sender(s: &str) -> Result<Sender, DbError> {
    match s {
        "Applicant" => Ok(Sender::Applicant),
        "Company" => Ok(Sender::Company),
        other => Err(DbError::Decode(format!("unknown sender: {other}"))),
    }
}

fn sender_to_string(s: Sender) -> &'static str {
    match s {
        Sender::Applicant => "Applicant",
        Sender::Company => "Company",
    }
}

/// SurrealDB implementation of the Conversation repository.
#[derive(Clone)]
pub struct SurrealConversationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealConversationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find_by_application(
        &self,
        application_id: Uuid,
    ) -> HireboardResult<Option<Conversation>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM conversation \
                 WHERE application_id = $application_id",
            )
            .bind(("application_id", application_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ConversationRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_conversation()?)),
            None => Ok(None),
        }
    }
}

impl<C: Connection> ConversationRepository for SurrealConversationRepository<C> {
    async fn get_or_create(&self, head: ApplicationHead) -> HireboardResult<Conversation> {
        if let Some(existing) = self.find_by_application(head.id).await? {
            return Ok(existing);
        }

        let id = Uuid::new_v4();
        let created = self
            .db
            .query(
                "CREATE type::record('conversation', $id) SET \
                 application_id = $application_id, \
                 organization_id = $organization_id, \
                 applicant_user_id = $applicant_user_id",
            )
            .bind(("id", id.to_string()))
            .bind(("application_id", head.id.to_string()))
            .bind(("organization_id", head.organization_id.to_string()))
            .bind(("applicant_user_id", head.applicant_user_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check();

        if let Err(e) = created {
            // Losing the creation race trips the unique index on
            // application_id, in which case the winner's row is
            // readable. Anything else is a real failure.
            return match self.find_by_application(head.id).await? {
                Some(winner) => Ok(winner),
                None => Err(DbError::Surreal(e).into()),
            };
        }

        // Read back the stored row for its canonical timestamp.
        self.find_by_application(head.id).await?.ok_or_else(|| {
            DbError::NotFound {
                entity: "conversation".into(),
                id: format!("application={}", head.id),
            }
            .into()
        })
    }

    async fn append_message(
        &self,
        conversation_id: Uuid,
        sender: Sender,
        sender_user_id: Uuid,
        body: String,
    ) -> HireboardResult<Message> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('message', $id) SET \
                 conversation_id = $conversation_id, \
                 sender = $sender, \
                 sender_user_id = $sender_user_id, \
                 body = $body; \
                 SELECT meta::id(id) AS record_id, * \
                 FROM type::record('message', $id)",
            )
            .bind(("id", id_str.clone()))
            .bind(("conversation_id", conversation_id.to_string()))
            .bind(("sender", sender_to_string(sender)))
            .bind(("sender_user_id", sender_user_id.to_string()))
            .bind(("body", body))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        // Statement 0 is the CREATE, statement 1 the SELECT with id.
        let rows: Vec<MessageRowWithId> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "message".into(),
            id: id_str,
        })?;

        Ok(row.try_into_message()?)
    }

    async fn list_messages(&self, conversation_id: Uuid) -> HireboardResult<Vec<Message>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM message \
                 WHERE conversation_id = $conversation_id \
                 ORDER BY created_at ASC",
            )
            .bind(("conversation_id", conversation_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MessageRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .map(|row| Ok(row.try_into_message()?))
            .collect()
    }
}
