//! services/api/src/adapters/store.rs
//!
//! In-memory implementations of the `ContentStore` and `ChatStore` ports.
//! The product keeps no state beyond process memory, so both stores are plain
//! append logs. The lock around each vector preserves the single-writer
//! discipline on `append` now that the runtime is multi-threaded; reads hand
//! out owned copies so callers never observe partial mutation of a later
//! write.

use async_trait::async_trait;
use std::sync::RwLock;
use teaching_assistant_core::domain::{ChatExchange, GeneratedArtifact, KindFilter};
use teaching_assistant_core::ports::{ChatStore, ContentStore, PortError, PortResult};

//=========================================================================================
// Content Store
//=========================================================================================

/// The in-memory content library backing the `ContentStore` port.
#[derive(Default)]
pub struct MemoryContentStore {
    entries: RwLock<Vec<GeneratedArtifact>>,
}

impl MemoryContentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn append(&self, artifact: GeneratedArtifact) -> PortResult<()> {
        self.entries
            .write()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .push(artifact);
        Ok(())
    }

    async fn list_all(&self) -> PortResult<Vec<GeneratedArtifact>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(entries.clone())
    }

    async fn filter(
        &self,
        kind: KindFilter,
        search: &str,
    ) -> PortResult<Vec<GeneratedArtifact>> {
        let needle = search.to_lowercase();
        let entries = self
            .entries
            .read()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(entries
            .iter()
            .filter(|a| kind.matches(a.kind))
            .filter(|a| {
                needle.is_empty()
                    || a.title.to_lowercase().contains(&needle)
                    || a.input_text.to_lowercase().contains(&needle)
                    || a.output_text.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}

//=========================================================================================
// Chat Store
//=========================================================================================

/// The in-memory chat history backing the `ChatStore` port.
#[derive(Default)]
pub struct MemoryChatStore {
    entries: RwLock<Vec<ChatExchange>>,
}

impl MemoryChatStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatStore for MemoryChatStore {
    async fn append(&self, exchange: ChatExchange) -> PortResult<()> {
        self.entries
            .write()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .push(exchange);
        Ok(())
    }

    async fn list_all(&self) -> PortResult<Vec<ChatExchange>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use teaching_assistant_core::domain::{ArtifactKind, ArtifactMetadata};

    fn artifact(kind: ArtifactKind, title: &str, input: &str, output: &str) -> GeneratedArtifact {
        let now = Utc::now();
        GeneratedArtifact {
            id: format!("artifact_{}_{}", now.timestamp_millis(), title),
            owner_id: "teacher-1".to_string(),
            kind,
            title: title.to_string(),
            input_text: input.to_string(),
            output_text: output.to_string(),
            metadata: ArtifactMetadata::default(),
            created_at: now,
            updated_at: now,
        }
    }

    async fn seeded_store() -> MemoryContentStore {
        let store = MemoryContentStore::new();
        store
            .append(artifact(
                ArtifactKind::Content,
                "Content - Photosynthesis",
                "Photosynthesis",
                "How plants make food",
            ))
            .await
            .unwrap();
        store
            .append(artifact(
                ArtifactKind::Worksheet,
                "Worksheet - Fractions",
                "Fractions",
                "Practice problems",
            ))
            .await
            .unwrap();
        store
            .append(artifact(
                ArtifactKind::VisualAid,
                "Visual Aid - Water cycle",
                "Water cycle",
                "Evaporation and rain diagram",
            ))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn filter_by_kind_keeps_only_that_kind() {
        let store = seeded_store().await;
        let worksheets = store
            .filter(KindFilter::Only(ArtifactKind::Worksheet), "")
            .await
            .unwrap();
        assert_eq!(worksheets.len(), 1);
        assert_eq!(worksheets[0].kind, ArtifactKind::Worksheet);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_across_fields() {
        let store = seeded_store().await;

        // Matches output_text, different case.
        let by_output = store.filter(KindFilter::All, "PLANTS").await.unwrap();
        assert_eq!(by_output.len(), 1);
        assert_eq!(by_output[0].input_text, "Photosynthesis");

        // Matches title.
        let by_title = store.filter(KindFilter::All, "fractions").await.unwrap();
        assert_eq!(by_title.len(), 1);

        // No match anywhere.
        let none = store.filter(KindFilter::All, "volcano").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn kind_and_search_filters_intersect() {
        let store = seeded_store().await;
        let hits = store
            .filter(KindFilter::Only(ArtifactKind::Content), "water")
            .await
            .unwrap();
        assert!(hits.is_empty());

        let hits = store
            .filter(KindFilter::Only(ArtifactKind::VisualAid), "water")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn reads_are_defensive_copies() {
        let store = seeded_store().await;
        let mut copy = store.list_all().await.unwrap();
        copy.clear();
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }
}
