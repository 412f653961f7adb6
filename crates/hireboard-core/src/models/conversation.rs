//! Conversation and message domain models.
//!
//! One conversation per application, created lazily on first access.
//! Readable and writable only by the application's applicant or a
//! member of the owning organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub application_id: Uuid,
    pub organization_id: Uuid,
    pub applicant_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Which side of the conversation sent a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sender {
    Applicant,
    Company,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender: Sender,
    pub sender_user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
