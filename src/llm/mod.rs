pub mod chat;

use thiserror::Error;

/// Any failure of an upstream completion call.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Invalid API key format: {0}")]
    InvalidApiKey(String),
    #[error("Request to LLM provider failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("LLM provider returned {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },
    #[error("No response content from LLM provider")]
    EmptyResponse,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub completion_model: Option<String>,
    pub base_url: Option<String>,
}
