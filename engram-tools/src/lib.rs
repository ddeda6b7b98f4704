//! # engram-tools — Tool Surface
//!
//! Exposes the memory pipeline upward as seven named tools:
//! `add-memory`, `search-memories`, `get-context`, `get-all-memories`,
//! `update-memory`, `delete-memory`, `consolidate-memories`.
//!
//! This crate owns the shape of that surface — JSON input schemas, typed
//! argument structs, a name-based dispatcher — and the [`MemoryService`]
//! that wires `engram-core`'s pure pipeline to an `engram-store`
//! collaborator. Transport (stdio framing, registration envelopes) belongs
//! to the embedding host, which calls [`MemoryService::dispatch`] with a
//! tool name and a JSON argument map and forwards the JSON it gets back.

pub mod args;
pub mod error;
pub mod response;
pub mod schema;
pub mod service;
pub mod telemetry;

pub use error::ToolError;
pub use response::ResponseStyle;
pub use service::{AddOutcome, ConsolidationReport, MemoryService};
