pub mod domain;
pub mod ports;
pub mod services;

pub use domain::{
    ArtifactKind, ArtifactMetadata, ChatExchange, GeneratedArtifact, GenerationRequest, KindFilter,
};
pub use ports::{
    ChatBackend, ChatStore, ContentStore, GenerationBackend, PortError, PortResult, Synthesis,
};
pub use services::{ChatService, GenerationService, IdGenerator};
