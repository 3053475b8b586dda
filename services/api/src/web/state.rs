//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::sync::Arc;
use teaching_assistant_core::services::{ChatService, GenerationService};

/// The shared application state, created once at startup and passed to all
/// handlers. The services own the stores; handlers never touch a store
/// directly.
#[derive(Clone)]
pub struct AppState {
    pub generation: GenerationService,
    pub chat: ChatService,
    pub config: Arc<Config>,
}
