//! Social Graph — person and friendship store over Neo4j.
//!
//! This crate is the single access point for the person graph. Every
//! operation runs exactly one parameterized statement inside its own
//! transaction, against a backend the [`GraphStore`] is constructed with.

pub mod backend;
pub mod client;
pub mod memory;
pub mod mutations;
pub mod queries;
pub mod statements;
pub mod store;

pub use backend::GraphBackend;
pub use client::{Neo4jBackend, StoreError};
pub use memory::MemoryBackend;
pub use statements::Statement;
pub use store::GraphStore;
