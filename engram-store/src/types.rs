//! Request types for the store collaborator.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single conversational turn handed to the store's extraction mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Speaker role ("user", "assistant").
    pub role: String,
    /// Turn text.
    pub content: String,
}

/// What to persist: a single prepared text, or raw conversation turns the
/// store may extract multiple memories from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddPayload {
    /// One prepared memory string.
    Text(String),
    /// Conversation turns for server-side extraction.
    Conversation(Vec<ConversationTurn>),
}

/// A request to persist memory content.
#[derive(Debug, Clone, Serialize)]
pub struct AddRequest {
    /// The content to persist.
    pub payload: AddPayload,
    /// Owner of the resulting records.
    pub user_id: String,
    /// Category labels to attach at creation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Structured metadata to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Creating agent, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Run / session identifier, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Ask the store to also build its entity/relationship graph.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub enable_graph: bool,
}

impl AddRequest {
    /// Create a plain-text add request.
    #[must_use]
    pub fn text(content: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            payload: AddPayload::Text(content.into()),
            user_id: user_id.into(),
            categories: Vec::new(),
            metadata: None,
            agent_id: None,
            run_id: None,
            enable_graph: false,
        }
    }

    /// Create a conversational add request (extraction mode).
    #[must_use]
    pub fn conversation(turns: Vec<ConversationTurn>, user_id: impl Into<String>) -> Self {
        Self {
            payload: AddPayload::Conversation(turns),
            user_id: user_id.into(),
            categories: Vec::new(),
            metadata: None,
            agent_id: None,
            run_id: None,
            enable_graph: false,
        }
    }

    /// Attach category labels.
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Attach structured metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Attach an agent identifier.
    #[must_use]
    pub fn with_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Attach a run / session identifier.
    #[must_use]
    pub fn with_run(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Request graph construction on the store side.
    #[must_use]
    pub fn with_graph(mut self, enable: bool) -> Self {
        self.enable_graph = enable;
        self
    }
}

/// Optional filters narrowing a semantic search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchFilters {
    /// Restrict to records carrying any of these categories.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Restrict to records created by this agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Restrict to records from this run / session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

impl SearchFilters {
    /// True when no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.agent_id.is_none() && self.run_id.is_none()
    }
}

/// A semantic search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Natural-language query.
    pub query: String,
    /// Whose memories to search.
    pub user_id: String,
    /// Maximum hits to return.
    pub limit: usize,
    /// Optional narrowing filters.
    #[serde(skip_serializing_if = "SearchFilters::is_empty")]
    pub filters: SearchFilters,
    /// Ask the store to consult its entity/relationship graph as well.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub enable_graph: bool,
}

impl SearchRequest {
    /// Create a search request with no filters.
    #[must_use]
    pub fn new(query: impl Into<String>, user_id: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            user_id: user_id.into(),
            limit,
            filters: SearchFilters::default(),
            enable_graph: false,
        }
    }

    /// Attach filters.
    #[must_use]
    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Request graph-augmented search on the store side.
    #[must_use]
    pub fn with_graph(mut self, enable: bool) -> Self {
        self.enable_graph = enable;
        self
    }
}

/// A record the store reports as created by an add call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedRecord {
    /// Identifier assigned by the store.
    pub id: String,
    /// Content as stored (extraction mode may differ from the input text).
    pub content: String,
}
