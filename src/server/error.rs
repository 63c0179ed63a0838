use axum::{ http::StatusCode, response::{ IntoResponse, Response }, Json };
use log::error;
use serde::Serialize;
use crate::agent::AgentError;

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        error!("Chat agent error: {}", err);
        ApiError::Internal("Internal server error".into())
    }
}
