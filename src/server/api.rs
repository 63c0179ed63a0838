use crate::agent::ChatAgent;
use crate::models::chat::{
    ChatRequest,
    ChatResponse,
    ClearResponse,
    ConversationHistory,
    HealthResponse,
    StatusResponse,
};
use crate::server::error::ApiError;
use std::sync::Arc;
use axum::{ routing::{ get, post }, Router, extract::{ State, Path }, Json };
use tower_http::cors::{ Any, CorsLayer };
use log::debug;

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<ChatAgent>,
}

pub fn build_router(agent: Arc<ChatAgent>) -> Router {
    let app_state = AppState { agent };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let chatbot = Router::new()
        .route("/chat", post(chat_handler))
        .route(
            "/conversation/{conversation_id}",
            get(history_handler).delete(clear_handler)
        )
        .route("/health", get(chatbot_health_handler));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/chatbot", chatbot)
        .layer(cors)
        .with_state(app_state)
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>
) -> Result<Json<ChatResponse>, ApiError> {
    debug!("Chat request for conversation {:?}", req.conversation_id);
    let response = state.agent.chat(&req.message, req.conversation_id).await?;
    Ok(Json(response))
}

async fn history_handler(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>
) -> Result<Json<ConversationHistory>, ApiError> {
    let messages = state.agent.get_history(&conversation_id).await?;
    Ok(Json(ConversationHistory { conversation_id, messages }))
}

async fn clear_handler(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>
) -> Result<Json<ClearResponse>, ApiError> {
    if state.agent.clear_conversation(&conversation_id).await? {
        Ok(
            Json(ClearResponse {
                message: "Conversation cleared successfully".into(),
            })
        )
    } else {
        Err(ApiError::NotFound("Conversation not found".into()))
    }
}

async fn chatbot_health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        service: Some("chatbot".into()),
        api: None,
    })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        service: None,
        api: Some("chatbot".into()),
    })
}

async fn root_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Campus Event Chatbot API is running".into(),
    })
}
