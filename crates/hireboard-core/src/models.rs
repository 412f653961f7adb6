//! Domain models for Hireboard.
//!
//! These are the core types shared across all crates. Every
//! tenant-scoped entity carries the owning `organization_id` directly
//! so that scope checks never require a join.

pub mod application;
pub mod conversation;
pub mod job;
pub mod membership;
pub mod organization;
pub mod user;
