//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use teaching_assistant_core::domain::{
    ChatExchange, GeneratedArtifact, GenerationRequest, KindFilter,
};
use teaching_assistant_core::ports::PortError;
use tracing::error;
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_artifact_handler,
        list_artifacts_handler,
        send_chat_message_handler,
        chat_history_handler,
    ),
    components(
        schemas(
            GenerateArtifactRequest,
            ArtifactResponse,
            ArtifactMetadataResponse,
            SendChatMessageRequest,
            ChatExchangeResponse,
        )
    ),
    tags(
        (name = "Teaching Assistant API", description = "API endpoints for generating teaching materials and chatting with the Q&A assistant.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Request, Response and Query Structs
//=========================================================================================

/// The request payload for generating a new artifact.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateArtifactRequest {
    /// One of "content", "worksheet", or "visual-aid".
    pub kind: String,
    pub input_text: String,
    pub language: Option<String>,
    pub grade_level: Option<String>,
    pub subject: Option<String>,
    pub attached_image: Option<String>,
}

/// Metadata section of an artifact response.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadataResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A stored artifact as returned to clients.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactResponse {
    pub id: String,
    pub owner_id: String,
    pub kind: String,
    pub title: String,
    pub input_text: String,
    pub output_text: String,
    pub metadata: ArtifactMetadataResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GeneratedArtifact> for ArtifactResponse {
    fn from(artifact: GeneratedArtifact) -> Self {
        Self {
            id: artifact.id,
            owner_id: artifact.owner_id,
            kind: artifact.kind.to_string(),
            title: artifact.title,
            input_text: artifact.input_text,
            output_text: artifact.output_text,
            metadata: ArtifactMetadataResponse {
                language: artifact.metadata.language,
                grade_level: artifact.metadata.grade_level,
                subject: artifact.metadata.subject,
                image_url: artifact.metadata.image_url,
            },
            created_at: artifact.created_at,
            updated_at: artifact.updated_at,
        }
    }
}

/// The request payload for sending one chat message.
#[derive(Deserialize, ToSchema)]
pub struct SendChatMessageRequest {
    pub message: String,
}

/// A stored chat exchange as returned to clients.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchangeResponse {
    pub id: String,
    pub owner_id: String,
    pub user_message: String,
    pub assistant_response: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatExchange> for ChatExchangeResponse {
    fn from(exchange: ChatExchange) -> Self {
        Self {
            id: exchange.id,
            owner_id: exchange.owner_id,
            user_message: exchange.user_message,
            assistant_response: exchange.assistant_response,
            timestamp: exchange.timestamp,
        }
    }
}

/// Query parameters accepted by the library listing.
#[derive(Deserialize, IntoParams)]
pub struct LibraryQuery {
    /// Artifact kind to keep ("content", "worksheet", "visual-aid"), or "all".
    pub kind: Option<String>,
    /// Case-insensitive substring matched against title, input, and output.
    pub q: Option<String>,
}

//=========================================================================================
// Handler Helpers
//=========================================================================================

/// Extracts and validates the `x-user-id` header naming the owner of the
/// request.
fn require_user_id(headers: &HeaderMap) -> Result<String, (StatusCode, String)> {
    let raw = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "x-user-id header is required".to_string(),
            )
        })?;

    let user_id = Uuid::parse_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid x-user-id format".to_string(),
        )
    })?;

    Ok(user_id.to_string())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Generate a new teaching artifact.
///
/// Blank input and kinds outside the closed set are rejected here, before the
/// generation service runs.
#[utoipa::path(
    post,
    path = "/artifacts",
    request_body = GenerateArtifactRequest,
    responses(
        (status = 201, description = "Artifact generated and stored", body = ArtifactResponse),
        (status = 400, description = "Bad request (e.g., blank input or unknown kind)"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the requesting user.")
    )
)]
pub async fn generate_artifact_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<GenerateArtifactRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let owner_id = require_user_id(&headers)?;

    if payload.input_text.trim().is_empty() {
        let err = PortError::InvalidRequest("input text must not be empty".to_string());
        return Err((StatusCode::BAD_REQUEST, err.to_string()));
    }

    let kind = payload
        .kind
        .parse()
        .map_err(|e: PortError| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let request = GenerationRequest {
        kind,
        input_text: payload.input_text,
        language: payload.language,
        grade_level: payload.grade_level,
        subject: payload.subject,
        attached_image: payload.attached_image,
    };

    match app_state.generation.generate(&owner_id, request).await {
        Ok(artifact) => Ok((StatusCode::CREATED, Json(ArtifactResponse::from(artifact)))),
        Err(e) => {
            error!("Failed to generate artifact: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate artifact".to_string(),
            ))
        }
    }
}

/// Browse the content library, optionally narrowed by kind and search text.
#[utoipa::path(
    get,
    path = "/artifacts",
    params(LibraryQuery),
    responses(
        (status = 200, description = "Matching artifacts, in generation order", body = [ArtifactResponse]),
        (status = 400, description = "Bad request (unknown kind filter)"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_artifacts_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<LibraryQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let kind = query
        .kind
        .as_deref()
        .unwrap_or("all")
        .parse::<KindFilter>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let search = query.q.unwrap_or_default();

    match app_state.generation.filter_artifacts(kind, &search).await {
        Ok(artifacts) => {
            let body: Vec<ArtifactResponse> =
                artifacts.into_iter().map(ArtifactResponse::from).collect();
            Ok(Json(body))
        }
        Err(e) => {
            error!("Failed to list artifacts: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to list artifacts".to_string(),
            ))
        }
    }
}

/// Send one message to the Q&A assistant.
#[utoipa::path(
    post,
    path = "/chat/messages",
    request_body = SendChatMessageRequest,
    responses(
        (status = 201, description = "Exchange stored", body = ChatExchangeResponse),
        (status = 400, description = "Bad request (blank message)"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the requesting user.")
    )
)]
pub async fn send_chat_message_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<SendChatMessageRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let owner_id = require_user_id(&headers)?;

    if payload.message.trim().is_empty() {
        let err = PortError::InvalidRequest("message must not be empty".to_string());
        return Err((StatusCode::BAD_REQUEST, err.to_string()));
    }

    match app_state.chat.send_message(&owner_id, &payload.message).await {
        Ok(exchange) => Ok((
            StatusCode::CREATED,
            Json(ChatExchangeResponse::from(exchange)),
        )),
        Err(e) => {
            error!("Failed to send chat message: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send chat message".to_string(),
            ))
        }
    }
}

/// Retrieve the full chat history, in call order.
#[utoipa::path(
    get,
    path = "/chat/messages",
    responses(
        (status = 200, description = "Every stored exchange, oldest first", body = [ChatExchangeResponse]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn chat_history_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    match app_state.chat.history().await {
        Ok(history) => {
            let body: Vec<ChatExchangeResponse> = history
                .into_iter()
                .map(ChatExchangeResponse::from)
                .collect();
            Ok(Json(body))
        }
        Err(e) => {
            error!("Failed to load chat history: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load chat history".to_string(),
            ))
        }
    }
}
