//! In-memory store used by tests and offline runs.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use engram_core::dedup::token_set_similarity;
use engram_core::types::{MemoryRecord, SearchHit};

use crate::error::StoreError;
use crate::types::{AddPayload, AddRequest, CreatedRecord, SearchRequest};
use crate::MemoryStore;

/// A `MemoryStore` held entirely in process memory.
///
/// Search ranks by lexical token overlap between the query and record
/// content — a stand-in for the remote service's semantic ranking that is
/// good enough for pipeline tests. Extraction mode is simulated by storing
/// one record per user turn. `enable_graph` is accepted and ignored.
#[derive(Default)]
pub struct LocalMemoryStore {
    records: RwLock<Vec<MemoryRecord>>,
}

impl LocalMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held (all users).
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True when the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn insert(&self, content: String, request: &AddRequest) -> CreatedRecord {
        let record = MemoryRecord {
            id: Uuid::new_v4().to_string(),
            content: content.clone(),
            categories: request.categories.clone(),
            metadata: request.metadata.clone(),
            agent_id: request.agent_id.clone(),
            run_id: request.run_id.clone(),
            created_at: Some(Utc::now()),
            user_id: request.user_id.clone(),
        };
        let created = CreatedRecord {
            id: record.id.clone(),
            content,
        };
        self.records.write().push(record);
        created
    }
}

#[async_trait]
impl MemoryStore for LocalMemoryStore {
    async fn add(&self, request: AddRequest) -> Result<Vec<CreatedRecord>, StoreError> {
        let created = match &request.payload {
            AddPayload::Text(content) => vec![self.insert(content.clone(), &request)],
            AddPayload::Conversation(turns) => turns
                .iter()
                .filter(|turn| turn.role == "user")
                .map(|turn| self.insert(turn.content.clone(), &request))
                .collect(),
        };
        Ok(created)
    }

    async fn search(&self, request: SearchRequest) -> Result<Vec<SearchHit>, StoreError> {
        let records = self.records.read();
        let mut hits: Vec<SearchHit> = records
            .iter()
            .filter(|r| r.user_id == request.user_id)
            .filter(|r| {
                request.filters.categories.is_empty()
                    || r.categories
                        .iter()
                        .any(|c| request.filters.categories.contains(c))
            })
            .filter(|r| {
                request
                    .filters
                    .agent_id
                    .as_ref()
                    .is_none_or(|a| r.agent_id.as_ref() == Some(a))
            })
            .filter(|r| {
                request
                    .filters
                    .run_id
                    .as_ref()
                    .is_none_or(|a| r.run_id.as_ref() == Some(a))
            })
            .map(|r| SearchHit {
                id: r.id.clone(),
                content: r.content.clone(),
                categories: r.categories.clone(),
                score: token_set_similarity(&request.query, &r.content),
                created_at: r.created_at,
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(request.limit);
        Ok(hits)
    }

    async fn get_all(&self, user_id: &str) -> Result<Vec<MemoryRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, new_text: &str, user_id: &str) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|r| r.id == id && r.user_id == user_id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.content = new_text.to_string();
        Ok(())
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| !(r.id == id && r.user_id == user_id));
        if records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConversationTurn;

    #[tokio::test]
    async fn add_and_get_all_round_trip() {
        let store = LocalMemoryStore::new();
        let created = store
            .add(AddRequest::text("User likes quiet mornings", "u1"))
            .await
            .expect("add");
        assert_eq!(created.len(), 1);

        let all = store.get_all("u1").await.expect("get_all");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "User likes quiet mornings");
        assert!(store.get_all("someone-else").await.expect("get_all").is_empty());
    }

    #[tokio::test]
    async fn conversation_payload_extracts_user_turns() {
        let store = LocalMemoryStore::new();
        let turns = vec![
            ConversationTurn {
                role: "user".to_string(),
                content: "I moved to Berlin last month".to_string(),
            },
            ConversationTurn {
                role: "assistant".to_string(),
                content: "Noted!".to_string(),
            },
        ];
        let created = store
            .add(AddRequest::conversation(turns, "u1"))
            .await
            .expect("add");
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].content, "I moved to Berlin last month");
    }

    #[tokio::test]
    async fn search_ranks_by_overlap_and_respects_limit() {
        let store = LocalMemoryStore::new();
        store
            .add(AddRequest::text("User loves pizza for dinner", "u1"))
            .await
            .expect("add");
        store
            .add(AddRequest::text("User lives in Chicago", "u1"))
            .await
            .expect("add");

        let hits = store
            .search(SearchRequest::new("pizza dinner", "u1", 1))
            .await
            .expect("search");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "User loves pizza for dinner");
    }

    #[tokio::test]
    async fn update_and_delete_by_id() {
        let store = LocalMemoryStore::new();
        let created = store
            .add(AddRequest::text("User drinks coffee", "u1"))
            .await
            .expect("add");
        let id = created[0].id.clone();

        store.update(&id, "User drinks tea now", "u1").await.expect("update");
        let all = store.get_all("u1").await.expect("get_all");
        assert_eq!(all[0].content, "User drinks tea now");

        store.delete(&id, "u1").await.expect("delete");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = LocalMemoryStore::new();
        let err = store.update("missing", "text", "u1").await.expect_err("must fail");
        assert!(matches!(err, StoreError::NotFound(_)));
        let err = store.delete("missing", "u1").await.expect_err("must fail");
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
