pub mod groq;

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use super::{ LlmConfig, LlmError };
use self::groq::GroqChatClient;
use crate::models::chat::PromptMessage;

/// Sampling temperature sent with every completion request.
pub const TEMPERATURE: f32 = 0.7;
/// Upper bound on generated tokens per reply.
pub const MAX_TOKENS: u32 = 1024;

#[derive(Deserialize, Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Runs one completion over an already assembled message list.
    async fn complete(&self, messages: &[PromptMessage]) -> Result<CompletionResponse, LlmError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let client = GroqChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
