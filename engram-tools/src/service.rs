//! The memory service — pipeline composition over a store collaborator.
//!
//! Write path: quality gate → duplicate check → enrichment → store add.
//! A memory is never partially written: both gates must pass before the
//! store is touched, and a rejection leaves the store exactly as it was.
//!
//! Proactive read path: over-fetched semantic search → hybrid rerank →
//! bounded context block. Batch path: full fetch → pair scan → report.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use engram_core::config::EngramConfig;
use engram_core::consolidation::ConsolidationScanner;
use engram_core::dedup::DuplicateDetector;
use engram_core::enrich::ContextEnricher;
use engram_core::quality::QualityGate;
use engram_core::recall::{RecallReranker, keywords};
use engram_core::types::{
    ConsolidationCandidate, DuplicateVerdict, MemoryRecord, QualityVerdict, RecallOutcome,
    SearchHit,
};
use engram_store::{
    AddRequest, CreatedRecord, MemoryStore, SearchFilters, SearchRequest,
};

use crate::args::{
    AddMemoryArgs, ConsolidateMemoriesArgs, DeleteMemoryArgs, GetAllMemoriesArgs, GetContextArgs,
    SearchMemoriesArgs, UpdateMemoryArgs,
};
use crate::error::{Result, ToolError};
use crate::response::{self, ResponseStyle};

/// How many extracted key terms seed the duplicate-candidate search.
const DEDUP_QUERY_TERMS: usize = 5;

/// Outcome of the write path.
///
/// Rejections are expected and recoverable — the caller may retry with
/// richer content or the force flag. Only store failures are errors.
#[derive(Debug)]
pub enum AddOutcome {
    /// The memory was persisted.
    Saved {
        /// Records the store reports as created.
        records: Vec<CreatedRecord>,
        /// The quality verdict that admitted the content.
        quality: QualityVerdict,
    },
    /// The quality gate refused the content.
    RejectedByQuality(QualityVerdict),
    /// An existing record is too similar.
    RejectedAsDuplicate(DuplicateVerdict),
}

/// Result of a consolidation pass.
#[derive(Debug)]
pub struct ConsolidationReport {
    /// Whether the caller asked for a preview-only run.
    pub dry_run: bool,
    /// How many records were scanned.
    pub total_memories: usize,
    /// Similar pairs, most similar first.
    pub candidates: Vec<ConsolidationCandidate>,
}

/// The service composing the pipeline with a store collaborator.
pub struct MemoryService {
    config: EngramConfig,
    gate: QualityGate,
    detector: DuplicateDetector,
    enricher: ContextEnricher,
    reranker: RecallReranker,
    scanner: ConsolidationScanner,
    style: ResponseStyle,
    store: Arc<dyn MemoryStore>,
}

impl MemoryService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(config: EngramConfig, store: Arc<dyn MemoryStore>) -> Self {
        let gate = QualityGate::new(config.quality.clone());
        let detector = DuplicateDetector::new(config.dedup.clone());
        let enricher = ContextEnricher::new(&config.quality);
        let reranker = RecallReranker::new(config.recall.clone());
        let scanner = ConsolidationScanner::new(config.dedup.clone());
        Self {
            config,
            gate,
            detector,
            enricher,
            reranker,
            scanner,
            style: ResponseStyle::Verbose,
            store,
        }
    }

    /// Use the given response style for dispatched calls.
    #[must_use]
    pub fn with_style(mut self, style: ResponseStyle) -> Self {
        self.style = style;
        self
    }

    fn user_for(&self, user_id: Option<String>) -> String {
        user_id.unwrap_or_else(|| self.config.store.default_user_id.clone())
    }

    // -----------------------------------------------------------------------
    // Write path
    // -----------------------------------------------------------------------

    /// Add a memory through the full gating pipeline.
    ///
    /// # Errors
    /// `InvalidArgument` for empty content; `Store` when the final add call
    /// fails. A failed duplicate-candidate search degrades to "no
    /// candidates" with a warning instead of blocking the write.
    pub async fn add_memory(&self, arguments: AddMemoryArgs) -> Result<AddOutcome> {
        if arguments.content.trim().is_empty() {
            return Err(ToolError::InvalidArgument("content must not be empty".into()));
        }
        let user_id = self.user_for(arguments.user_id);

        let quality = self.gate.assess(&arguments.content, arguments.force);
        if !quality.accepted {
            info!(score = quality.score, issues = ?quality.issues, "memory rejected by quality gate");
            return Ok(AddOutcome::RejectedByQuality(quality));
        }

        if !arguments.force {
            let candidates = self
                .duplicate_candidates(&arguments.content, &user_id)
                .await;
            let verdict = self.detector.check_duplicate(&arguments.content, &candidates);
            if verdict.is_duplicate {
                info!(
                    similarity = verdict.similarity,
                    matched_id = verdict.matched_id.as_deref(),
                    "memory rejected as duplicate"
                );
                return Ok(AddOutcome::RejectedAsDuplicate(verdict));
            }
        }

        let metadata = self.enricher.enrich(&arguments.content, arguments.metadata);
        let mut request = AddRequest::text(arguments.content, user_id)
            .with_categories(arguments.categories)
            .with_metadata(metadata)
            .with_graph(arguments.enable_graph);
        if let Some(agent_id) = arguments.agent_id {
            request = request.with_agent(agent_id);
        }
        if let Some(run_id) = arguments.run_id {
            request = request.with_run(run_id);
        }

        let records = self.store.add(request).await?;
        debug!(created = records.len(), "memory saved");
        Ok(AddOutcome::Saved { records, quality })
    }

    /// Fetch near-duplicate candidates via the store's semantic search.
    ///
    /// Search failure here must not block an otherwise valid write, so it
    /// degrades to an empty candidate list.
    async fn duplicate_candidates(&self, content: &str, user_id: &str) -> Vec<SearchHit> {
        let key_terms = keywords::extract_keywords(content, &self.config.recall.stop_words);
        if key_terms.is_empty() {
            return Vec::new();
        }
        let query = key_terms
            .iter()
            .take(DEDUP_QUERY_TERMS)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");

        let request =
            SearchRequest::new(query, user_id, self.config.dedup.candidate_fetch_limit);
        match self.store.search(request).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "duplicate-candidate search failed; proceeding without candidates");
                Vec::new()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Read paths
    // -----------------------------------------------------------------------

    /// Plain semantic search, limit capped by configuration.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty query; `Store` on collaborator
    /// failure.
    pub async fn search_memories(&self, arguments: SearchMemoriesArgs) -> Result<Vec<SearchHit>> {
        if arguments.query.trim().is_empty() {
            return Err(ToolError::InvalidArgument("query must not be empty".into()));
        }
        let user_id = self.user_for(arguments.user_id);
        let limit = arguments
            .limit
            .unwrap_or(10)
            .min(self.config.recall.search_limit_cap);

        let request = SearchRequest::new(arguments.query, user_id, limit).with_filters(
            SearchFilters {
                categories: arguments.categories,
                agent_id: arguments.agent_id,
                run_id: arguments.run_id,
            },
        );
        Ok(self.store.search(request).await?)
    }

    /// Build a proactive context block for the current conversation.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty message; `Store` on collaborator
    /// failure.
    pub async fn get_context(&self, arguments: GetContextArgs) -> Result<RecallOutcome> {
        if arguments.message.trim().is_empty() {
            return Err(ToolError::InvalidArgument("message must not be empty".into()));
        }
        let user_id = self.user_for(arguments.user_id);
        let max_results = arguments.max_results.unwrap_or(10);

        let query = RecallReranker::build_query(&arguments.message, &arguments.recent_messages);
        let request = SearchRequest::new(
            query.clone(),
            user_id,
            self.reranker.overfetch_limit(max_results),
        )
        .with_graph(arguments.enable_graph);

        let hits = self.store.search(request).await?;
        Ok(self.reranker.rerank(&query, &hits, max_results))
    }

    /// Fetch every memory for a user.
    ///
    /// # Errors
    /// `Store` on collaborator failure.
    pub async fn get_all_memories(
        &self,
        arguments: GetAllMemoriesArgs,
    ) -> Result<Vec<MemoryRecord>> {
        let user_id = self.user_for(arguments.user_id);
        Ok(self.store.get_all(&user_id).await?)
    }

    /// Replace the content of an existing memory.
    ///
    /// # Errors
    /// `InvalidArgument` for empty content; `Store` on collaborator failure
    /// or unknown id.
    pub async fn update_memory(&self, arguments: UpdateMemoryArgs) -> Result<()> {
        if arguments.content.trim().is_empty() {
            return Err(ToolError::InvalidArgument("content must not be empty".into()));
        }
        let user_id = self.user_for(arguments.user_id);
        self.store
            .update(&arguments.memory_id, &arguments.content, &user_id)
            .await?;
        Ok(())
    }

    /// Permanently delete a memory.
    ///
    /// # Errors
    /// `Store` on collaborator failure or unknown id.
    pub async fn delete_memory(&self, arguments: DeleteMemoryArgs) -> Result<()> {
        let user_id = self.user_for(arguments.user_id);
        self.store.delete(&arguments.memory_id, &user_id).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Batch path
    // -----------------------------------------------------------------------

    /// Scan all memories for consolidation candidates.
    ///
    /// Report-only: merging stays with the operator through explicit
    /// update/delete calls.
    ///
    /// # Errors
    /// `Store` on collaborator failure.
    pub async fn consolidate_memories(
        &self,
        arguments: ConsolidateMemoriesArgs,
    ) -> Result<ConsolidationReport> {
        let user_id = self.user_for(arguments.user_id);
        let records = self.store.get_all(&user_id).await?;
        let candidates = self.scanner.scan(&records);
        Ok(ConsolidationReport {
            dry_run: arguments.dry_run,
            total_memories: records.len(),
            candidates,
        })
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Route a named tool call with JSON arguments to its handler and
    /// serialize the outcome under the service's response style.
    ///
    /// # Errors
    /// `UnknownTool` for unrecognized names, `InvalidArgument` for
    /// malformed argument maps, and whatever the handler itself raises.
    pub async fn dispatch(&self, tool: &str, arguments: Value) -> Result<Value> {
        fn typed<T: serde::de::DeserializeOwned>(arguments: Value) -> Result<T> {
            serde_json::from_value(arguments)
                .map_err(|e| ToolError::InvalidArgument(e.to_string()))
        }

        match tool {
            "add-memory" => {
                let outcome = self.add_memory(typed(arguments)?).await?;
                Ok(response::add_outcome(&outcome, self.style))
            }
            "search-memories" => {
                let hits = self.search_memories(typed(arguments)?).await?;
                Ok(response::search_results(&hits))
            }
            "get-context" => {
                let outcome = self.get_context(typed(arguments)?).await?;
                Ok(response::recall_outcome(&outcome))
            }
            "get-all-memories" => {
                let records = self.get_all_memories(typed(arguments)?).await?;
                Ok(response::all_memories(&records))
            }
            "update-memory" => {
                self.update_memory(typed(arguments)?).await?;
                Ok(response::simple_ok("Memory updated successfully", self.style))
            }
            "delete-memory" => {
                self.delete_memory(typed(arguments)?).await?;
                Ok(response::simple_ok("Memory deleted successfully", self.style))
            }
            "consolidate-memories" => {
                let report = self.consolidate_memories(typed(arguments)?).await?;
                Ok(response::consolidation_report(&report, self.style))
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}
