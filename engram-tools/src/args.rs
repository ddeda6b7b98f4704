//! Typed argument structs for the tool surface.
//!
//! Field names follow the wire convention of the tool protocol (camelCase).
//! Deserialization failures surface as `InvalidArgument` before any store
//! contact.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Arguments for `add-memory`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddMemoryArgs {
    /// Self-contained memory content.
    pub content: String,
    /// Owner; defaults to the configured user when omitted.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Category labels to attach at creation.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Structured metadata to attach.
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    /// Creating agent, if any.
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Run / session identifier, if any.
    #[serde(default)]
    pub run_id: Option<String>,
    /// Bypass quality and duplicate checks.
    #[serde(default)]
    pub force: bool,
    /// Ask the store to build its entity graph for this record.
    #[serde(default)]
    pub enable_graph: bool,
}

/// Arguments for `search-memories`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchMemoriesArgs {
    /// Natural-language search query.
    pub query: String,
    /// Owner; defaults to the configured user when omitted.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Maximum results; capped by configuration.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Restrict to these categories.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Restrict to this agent.
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Restrict to this run / session.
    #[serde(default)]
    pub run_id: Option<String>,
}

/// Arguments for `get-context`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GetContextArgs {
    /// The current conversational message.
    pub message: String,
    /// Recent turns, oldest first.
    #[serde(default)]
    pub recent_messages: Vec<String>,
    /// Owner; defaults to the configured user when omitted.
    #[serde(default)]
    pub user_id: Option<String>,
    /// How many memories the context block may contain.
    #[serde(default)]
    pub max_results: Option<usize>,
    /// Consult the store's entity graph during search.
    #[serde(default)]
    pub enable_graph: bool,
}

/// Arguments for `get-all-memories`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GetAllMemoriesArgs {
    /// Owner; defaults to the configured user when omitted.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Arguments for `update-memory`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateMemoryArgs {
    /// Identifier of the memory to update.
    pub memory_id: String,
    /// Replacement content.
    pub content: String,
    /// Owner; defaults to the configured user when omitted.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Arguments for `delete-memory`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteMemoryArgs {
    /// Identifier of the memory to delete.
    pub memory_id: String,
    /// Owner; defaults to the configured user when omitted.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Arguments for `consolidate-memories`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConsolidateMemoriesArgs {
    /// Owner; defaults to the configured user when omitted.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Preview only. The scan never mutates either way; this is forwarded
    /// so the caller knows no merge was performed.
    #[serde(default = "default_true")]
    pub dry_run: bool,
}

impl Default for ConsolidateMemoriesArgs {
    fn default() -> Self {
        Self {
            user_id: None,
            dry_run: true,
        }
    }
}

fn default_true() -> bool {
    true
}
