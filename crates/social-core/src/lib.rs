//! social-core: Shared types, configuration, and error handling for the social graph.
//!
//! This crate provides the foundational types used across all components:
//! - Person node types and their backend-assigned identifiers
//! - Store configuration loaded from file and environment
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::StoreConfig;
pub use error::SocialError;
pub use types::{NewPerson, PersonId, PersonSummary};
