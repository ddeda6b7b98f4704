//! # engram-store — Memory Store Collaborator
//!
//! The pipeline in `engram-core` is pure; everything that persists or
//! semantically ranks memories lives behind the [`MemoryStore`] trait
//! defined here. Two implementations ship:
//!
//! - [`RemoteMemoryClient`] — JSON/HTTP client for a remote semantic-memory
//!   service (bearer auth, per-request timeout, bounded retry).
//! - [`LocalMemoryStore`] — in-memory store with naive lexical ranking,
//!   for tests and offline runs.
//!
//! Retry policy lives here, with the collaborator, not in the pipeline:
//! callers above see a single `StoreError` once the client has given up.

pub mod client;
pub mod error;
pub mod local;
pub mod types;

use async_trait::async_trait;

use engram_core::types::{MemoryRecord, SearchHit};

pub use client::RemoteMemoryClient;
pub use error::StoreError;
pub use local::LocalMemoryStore;
pub use types::{AddPayload, AddRequest, ConversationTurn, CreatedRecord, SearchFilters, SearchRequest};

/// The external memory collaborator.
///
/// Object-safe so services can hold `Arc<dyn MemoryStore>` and swap the
/// remote client for the local store in tests.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Persist new memory content.
    ///
    /// With a conversational payload the store may run AI-driven extraction
    /// and create zero or more records; with plain text it creates one.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the store cannot be reached or rejects
    /// the request.
    async fn add(&self, request: AddRequest) -> Result<Vec<CreatedRecord>, StoreError>;

    /// Semantic search over a user's memories.
    ///
    /// # Errors
    /// Returns a [`StoreError`] on collaborator failure.
    async fn search(&self, request: SearchRequest) -> Result<Vec<SearchHit>, StoreError>;

    /// Fetch every memory owned by a user.
    ///
    /// # Errors
    /// Returns a [`StoreError`] on collaborator failure.
    async fn get_all(&self, user_id: &str) -> Result<Vec<MemoryRecord>, StoreError>;

    /// Replace the content of an existing memory.
    ///
    /// # Errors
    /// Returns a [`StoreError`] on collaborator failure or unknown id.
    async fn update(&self, id: &str, new_text: &str, user_id: &str) -> Result<(), StoreError>;

    /// Permanently delete a memory.
    ///
    /// # Errors
    /// Returns a [`StoreError`] on collaborator failure or unknown id.
    async fn delete(&self, id: &str, user_id: &str) -> Result<(), StoreError>;
}
