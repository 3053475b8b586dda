//! crates/teaching_assistant_core/src/services.rs
//!
//! The application services orchestrating the generation and chat pipelines
//! over the injected ports. These are the only entry points that mutate the
//! stores; presenters obtain read-only copies through the query methods.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    ArtifactMetadata, ChatExchange, GeneratedArtifact, GenerationRequest, KindFilter,
};
use crate::ports::{ChatBackend, ChatStore, ContentStore, GenerationBackend, PortResult};

/// Language recorded on an artifact when the request does not name one.
const DEFAULT_LANGUAGE: &str = "English";

//=========================================================================================
// Id Generation
//=========================================================================================

/// Mints opaque identifiers of the form `<prefix>_<unix-millis>_<sequence>`.
///
/// The sequence component keeps ids distinct even when several are minted
/// within the same millisecond. Uniqueness is guaranteed within a single
/// process lifetime only.
#[derive(Debug, Default)]
pub struct IdGenerator {
    sequence: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, prefix: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), seq)
    }
}

//=========================================================================================
// Generation Service
//=========================================================================================

/// Orchestrates artifact generation: the injected backend synthesizes the
/// body, the service assembles the artifact and appends it to the content
/// store. Each successful call grows the store by exactly one entry.
#[derive(Clone)]
pub struct GenerationService {
    store: Arc<dyn ContentStore>,
    backend: Arc<dyn GenerationBackend>,
    ids: Arc<IdGenerator>,
}

impl GenerationService {
    /// Creates a new `GenerationService` over the given store and backend.
    pub fn new(store: Arc<dyn ContentStore>, backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            store,
            backend,
            ids: Arc::new(IdGenerator::new()),
        }
    }

    /// Generates one artifact for `owner_id` and appends it to the store.
    ///
    /// Precondition: `request.input_text` is non-empty. Enforcing this is the
    /// caller's responsibility; the service does not re-validate it.
    pub async fn generate(
        &self,
        owner_id: &str,
        request: GenerationRequest,
    ) -> PortResult<GeneratedArtifact> {
        let synthesis = self.backend.synthesize(&request).await?;

        let metadata = ArtifactMetadata {
            language: Some(
                request
                    .language
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            ),
            grade_level: request.grade_level.clone(),
            subject: request.subject.clone(),
            image_url: synthesis.image_url,
        };

        let now = Utc::now();
        let artifact = GeneratedArtifact {
            id: self.ids.next("artifact"),
            owner_id: owner_id.to_string(),
            kind: request.kind,
            title: format!("{} - {}", request.kind.label(), request.input_text),
            input_text: request.input_text,
            output_text: synthesis.output_text,
            metadata,
            created_at: now,
            updated_at: now,
        };

        self.store.append(artifact.clone()).await?;
        info!(artifact_id = %artifact.id, kind = %artifact.kind, "Generated artifact");
        Ok(artifact)
    }

    /// Returns every stored artifact, in completion order.
    pub async fn list_artifacts(&self) -> PortResult<Vec<GeneratedArtifact>> {
        self.store.list_all().await
    }

    /// Returns the artifacts matching the library filter.
    pub async fn filter_artifacts(
        &self,
        kind: KindFilter,
        search: &str,
    ) -> PortResult<Vec<GeneratedArtifact>> {
        self.store.filter(kind, search).await
    }
}

//=========================================================================================
// Chat Service
//=========================================================================================

/// Orchestrates the Q&A assistant: the injected backend produces the reply
/// and the full exchange is appended to the chat store.
#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn ChatStore>,
    backend: Arc<dyn ChatBackend>,
    ids: Arc<IdGenerator>,
}

impl ChatService {
    /// Creates a new `ChatService` over the given store and backend.
    pub fn new(store: Arc<dyn ChatStore>, backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            store,
            backend,
            ids: Arc::new(IdGenerator::new()),
        }
    }

    /// Sends one user message and returns the stored exchange.
    ///
    /// Precondition: `text` is non-empty (caller's responsibility, as with
    /// [`GenerationService::generate`]).
    pub async fn send_message(&self, owner_id: &str, text: &str) -> PortResult<ChatExchange> {
        let response = self.backend.respond(text).await?;

        let exchange = ChatExchange {
            id: self.ids.next("chat"),
            owner_id: owner_id.to_string(),
            user_message: text.to_string(),
            assistant_response: response,
            timestamp: Utc::now(),
        };

        self.store.append(exchange.clone()).await?;
        info!(exchange_id = %exchange.id, "Stored chat exchange");
        Ok(exchange)
    }

    /// Returns the full chat history, in call order.
    pub async fn history(&self) -> PortResult<Vec<ChatExchange>> {
        self.store.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArtifactKind;
    use crate::ports::Synthesis;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct VecContentStore {
        entries: Mutex<Vec<GeneratedArtifact>>,
    }

    impl VecContentStore {
        fn new() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ContentStore for VecContentStore {
        async fn append(&self, artifact: GeneratedArtifact) -> PortResult<()> {
            self.entries.lock().unwrap().push(artifact);
            Ok(())
        }

        async fn list_all(&self) -> PortResult<Vec<GeneratedArtifact>> {
            Ok(self.entries.lock().unwrap().clone())
        }

        async fn filter(
            &self,
            kind: KindFilter,
            _search: &str,
        ) -> PortResult<Vec<GeneratedArtifact>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|a| kind.matches(a.kind))
                .cloned()
                .collect())
        }
    }

    struct VecChatStore {
        entries: Mutex<Vec<ChatExchange>>,
    }

    impl VecChatStore {
        fn new() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatStore for VecChatStore {
        async fn append(&self, exchange: ChatExchange) -> PortResult<()> {
            self.entries.lock().unwrap().push(exchange);
            Ok(())
        }

        async fn list_all(&self) -> PortResult<Vec<ChatExchange>> {
            Ok(self.entries.lock().unwrap().clone())
        }
    }

    struct FixedBackend {
        image_url: Option<String>,
    }

    #[async_trait]
    impl GenerationBackend for FixedBackend {
        async fn synthesize(&self, request: &GenerationRequest) -> PortResult<Synthesis> {
            Ok(Synthesis {
                output_text: format!("body for {}", request.input_text),
                image_url: self.image_url.clone(),
            })
        }
    }

    struct EchoChatBackend;

    #[async_trait]
    impl ChatBackend for EchoChatBackend {
        async fn respond(&self, message: &str) -> PortResult<String> {
            Ok(format!("you said: {}", message))
        }
    }

    fn generation_service(image_url: Option<String>) -> GenerationService {
        GenerationService::new(
            Arc::new(VecContentStore::new()),
            Arc::new(FixedBackend { image_url }),
        )
    }

    fn request(kind: ArtifactKind, input: &str) -> GenerationRequest {
        GenerationRequest {
            kind,
            input_text: input.to_string(),
            language: None,
            grade_level: None,
            subject: None,
            attached_image: None,
        }
    }

    #[tokio::test]
    async fn generate_copies_kind_and_input_verbatim() {
        let service = generation_service(None);
        let artifact = service
            .generate("teacher-1", request(ArtifactKind::Worksheet, "fractions"))
            .await
            .unwrap();

        assert_eq!(artifact.kind, ArtifactKind::Worksheet);
        assert_eq!(artifact.input_text, "fractions");
        assert_eq!(artifact.owner_id, "teacher-1");
        assert!(artifact.title.contains("fractions"));
    }

    #[tokio::test]
    async fn generate_defaults_language_and_copies_explicit_metadata() {
        let service = generation_service(None);

        let defaulted = service
            .generate("t", request(ArtifactKind::Content, "photosynthesis"))
            .await
            .unwrap();
        assert_eq!(defaulted.metadata.language.as_deref(), Some("English"));
        assert_eq!(defaulted.metadata.grade_level, None);

        let mut explicit = request(ArtifactKind::Content, "photosynthesis");
        explicit.language = Some("Spanish".to_string());
        explicit.grade_level = Some("Elementary".to_string());
        explicit.subject = Some("Biology".to_string());
        let artifact = service.generate("t", explicit).await.unwrap();
        assert_eq!(artifact.metadata.language.as_deref(), Some("Spanish"));
        assert_eq!(artifact.metadata.grade_level.as_deref(), Some("Elementary"));
        assert_eq!(artifact.metadata.subject.as_deref(), Some("Biology"));
    }

    #[tokio::test]
    async fn generate_grows_store_by_one_per_call() {
        let service = generation_service(None);
        for i in 0..5 {
            service
                .generate("t", request(ArtifactKind::Content, &format!("topic {}", i)))
                .await
                .unwrap();
            assert_eq!(service.list_artifacts().await.unwrap().len(), i + 1);
        }

        let all = service.list_artifacts().await.unwrap();
        let inputs: Vec<_> = all.iter().map(|a| a.input_text.as_str()).collect();
        assert_eq!(
            inputs,
            ["topic 0", "topic 1", "topic 2", "topic 3", "topic 4"]
        );
    }

    #[tokio::test]
    async fn backend_image_url_flows_into_metadata() {
        let service = generation_service(Some("https://example.com/aid.jpeg".to_string()));
        let artifact = service
            .generate("t", request(ArtifactKind::VisualAid, "Water cycle"))
            .await
            .unwrap();
        assert_eq!(
            artifact.metadata.image_url.as_deref(),
            Some("https://example.com/aid.jpeg")
        );
    }

    #[tokio::test]
    async fn chat_stores_exchanges_in_call_order() {
        let service = ChatService::new(Arc::new(VecChatStore::new()), Arc::new(EchoChatBackend));

        let first = service.send_message("t", "how do magnets work").await.unwrap();
        let second = service.send_message("t", "what about gravity").await.unwrap();
        assert_eq!(first.user_message, "how do magnets work");
        assert_eq!(second.user_message, "what about gravity");
        assert_ne!(first.id, second.id);

        let history = service.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, first.id);
        assert_eq!(history[1].id, second.id);
    }

    #[test]
    fn id_generator_is_unique_under_rapid_calls() {
        let ids = IdGenerator::new();
        let minted: HashSet<String> = (0..1000).map(|_| ids.next("artifact")).collect();
        assert_eq!(minted.len(), 1000);
    }
}
