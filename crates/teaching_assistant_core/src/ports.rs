//! crates/teaching_assistant_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like storage engines
//! or real model backends.

use async_trait::async_trait;

use crate::domain::{ChatExchange, GeneratedArtifact, GenerationRequest, KindFilter};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The request is malformed, e.g. empty input text. Rejecting empty input
    /// is the caller's responsibility; the services themselves do not
    /// re-validate it.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// A kind string outside the closed artifact-kind set.
    #[error("Unknown artifact kind: {0}")]
    UnknownKind(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Store Ports (Traits)
//=========================================================================================

/// The ordered, append-only log of generated artifacts.
///
/// Entries are never updated or removed once appended. The library UI shows a
/// delete control, but the product defines no backing operation for it, so
/// this port intentionally carries no `remove`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Adds an artifact to the end of the log.
    async fn append(&self, artifact: GeneratedArtifact) -> PortResult<()>;

    /// Returns a copy of every stored artifact, in append order. Callers
    /// receive owned data and cannot mutate store internals through it.
    async fn list_all(&self) -> PortResult<Vec<GeneratedArtifact>>;

    /// Returns the artifacts whose kind matches `kind` and, when `search` is
    /// non-empty, whose title, input text, or output text contains it
    /// case-insensitively. Full scan; no pagination at this scale.
    async fn filter(&self, kind: KindFilter, search: &str)
        -> PortResult<Vec<GeneratedArtifact>>;
}

/// The ordered, append-only log of chat exchanges.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Adds an exchange to the end of the log.
    async fn append(&self, exchange: ChatExchange) -> PortResult<()>;

    /// Returns a copy of the full history, in append order.
    async fn list_all(&self) -> PortResult<Vec<ChatExchange>>;
}

//=========================================================================================
// Backend Ports (Traits)
//=========================================================================================

/// The output of a generation backend: the artifact body plus any metadata
/// the backend contributes.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub output_text: String,
    pub image_url: Option<String>,
}

/// The pluggable text-generation capability behind the generation service.
///
/// The shipped implementation fabricates text from fixed templates; a real
/// model-backed implementation can replace it without touching the service.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Produces the artifact body for a request. Callers guarantee the
    /// request's input text is non-empty.
    async fn synthesize(&self, request: &GenerationRequest) -> PortResult<Synthesis>;
}

/// The pluggable assistant capability behind the chat service.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Produces the assistant's reply to a user message. Callers guarantee
    /// the message is non-empty.
    async fn respond(&self, message: &str) -> PortResult<String>;
}
