//! Authenticated user identity.
//!
//! Accounts are created, verified, and destroyed entirely by the
//! external auth collaborator; this core only consumes the resolved
//! identity attached to a request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity the auth collaborator resolved from a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}
