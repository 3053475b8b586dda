//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{CannedChatBackend, MemoryChatStore, MemoryContentStore, TemplateBackend},
    config::Config,
    error::ApiError,
    web::{
        chat_history_handler, generate_artifact_handler, list_artifacts_handler, rest::ApiDoc,
        send_chat_message_handler, state::AppState,
    },
};
use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderName, HeaderValue, Method,
    },
    routing::get,
    Router,
};
use std::sync::Arc;
use teaching_assistant_core::services::{ChatService, GenerationService};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Stores & Backends ---
    let content_store = Arc::new(MemoryContentStore::new());
    let chat_store = Arc::new(MemoryChatStore::new());
    let generation_backend = Arc::new(TemplateBackend::new(config.generation_delay));
    let chat_backend = Arc::new(CannedChatBackend::new(config.chat_delay));

    // --- 3. Build the Services & Shared AppState ---
    let app_state = Arc::new(AppState {
        generation: GenerationService::new(content_store, generation_backend),
        chat: ChatService::new(chat_store, chat_backend),
        config: config.clone(),
    });

    let cors_origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid CORS origin '{}': {}",
            config.cors_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT, HeaderName::from_static("x-user-id")]);

    // --- 4. Create the Web Router ---
    let api_router = Router::new()
        .route(
            "/artifacts",
            get(list_artifacts_handler).post(generate_artifact_handler),
        )
        .route(
            "/chat/messages",
            get(chat_history_handler).post(send_chat_message_handler),
        )
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
