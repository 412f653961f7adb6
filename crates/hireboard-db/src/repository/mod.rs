//! SurrealDB repository implementations.

mod application;
mod conversation;
mod job;
mod membership;
mod organization;

pub use application::SurrealApplicationRepository;
pub use conversation::SurrealConversationRepository;
pub use job::SurrealJobRepository;
pub use membership::SurrealMembershipRepository;
pub use organization::SurrealOrganizationRepository;
