//! Hireboard Access — the tenant-scoped authorization core.
//!
//! Every inbound request flows through a strict sequential pipeline:
//!
//! 1. Identity (resolved by the external auth collaborator, consumed
//!    here as an optional [`AuthUser`])
//! 2. Role lookup ([`RoleResolver`]) — which organization, if any, the
//!    user may act for, and with what level
//! 3. Access decision ([`authorize`]) — allow/deny plus the tenant
//!    scope the data operation must be filtered by
//! 4. Row-scope enforcement ([`scope`]) — the filter is attached to
//!    list reads and re-verified against the fetched row on writes
//!
//! Denials happen before any data operation executes. The role is
//! recomputed on every request, never cached across requests, so a
//! revoked membership takes effect on the very next request.
//!
//! [`AuthUser`]: hireboard_core::models::user::AuthUser

pub mod config;
pub mod context;
pub mod conversation;
pub mod decision;
pub mod error;
pub mod files;
pub mod intake;
pub mod onboarding;
pub mod role;
pub mod scope;

pub use config::AccessConfig;
pub use context::RequestContext;
pub use conversation::{ConversationAccess, ConversationGate};
pub use decision::{Action, Decision, TenantScope, authorize};
pub use error::AccessError;
pub use role::{MemberLevel, RoleResolver, RoleResult};
pub use scope::ScopedApplications;
