//! Hireboard Core — domain models, error taxonomy, and repository
//! traits shared across all crates.
//!
//! This crate has no I/O and no database dependency; storage backends
//! implement the traits in [`repository`].

pub mod error;
pub mod models;
pub mod repository;

pub use error::{HireboardError, HireboardResult};
