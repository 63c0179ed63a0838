use chrono::Utc;
use log::{ info, error };
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::prompt::PromptAssembler;
use crate::config::Settings;
use crate::history::{ HistoryError, HistoryStore, initialize_history_store };
use crate::llm::chat::{ ChatClient, new_client as new_chat_client };
use crate::llm::{ LlmConfig, LlmError };
use crate::models::chat::{ ChatMessage, ChatResponse };

/// Reply sent in place of the model's answer when the upstream call fails.
pub const FALLBACK_MESSAGE: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again in a moment.";

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Ties the history store, prompt assembly and the upstream model together.
///
/// Upstream failures never escape [`ChatAgent::chat`]; they turn into
/// [`FALLBACK_MESSAGE`] and leave the history untouched. Only store failures
/// are reported to the caller.
#[derive(Clone)]
pub struct ChatAgent {
    chat_client: Arc<dyn ChatClient>,
    history_store: Arc<dyn HistoryStore>,
    prompt: PromptAssembler,
}

impl ChatAgent {
    pub fn new(
        chat_client: Arc<dyn ChatClient>,
        history_store: Arc<dyn HistoryStore>,
        prompt: PromptAssembler
    ) -> Self {
        Self { chat_client, history_store, prompt }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AgentError> {
        let chat_config = LlmConfig {
            api_key: settings.api_key.clone(),
            completion_model: Some(settings.chat_model.clone()),
            base_url: Some(settings.chat_base_url.clone()),
        };
        let chat_client = new_chat_client(&chat_config)?;
        info!(
            "Chat client configured: Model={}, BaseURL={}",
            chat_client.get_model(),
            chat_client.get_base_url().as_deref().unwrap_or("adapter default")
        );

        let history_store = initialize_history_store(settings.max_conversations);
        let prompt = PromptAssembler::new(settings.system_prompt.clone());

        Ok(Self::new(chat_client, history_store, prompt))
    }

    async fn execute_llm_interaction(
        &self,
        history: &[ChatMessage],
        message: &str
    ) -> Result<String, LlmError> {
        let messages = self.prompt.assemble(history, message);
        let resp = self.chat_client.complete(&messages).await?;
        Ok(resp.response)
    }

    pub async fn chat(
        &self,
        message: &str,
        conversation_id: Option<String>
    ) -> Result<ChatResponse, AgentError> {
        let conversation_id = match conversation_id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                self.history_store.create(&id).await?;
                info!("Started conversation {}", id);
                id
            }
        };

        let history = self.history_store.get(&conversation_id).await?;

        match self.execute_llm_interaction(&history, message).await {
            Ok(response_content) => {
                let timestamp = Utc::now();
                self.history_store.append(
                    &conversation_id,
                    ChatMessage::user(message, timestamp)
                ).await?;
                self.history_store.append(
                    &conversation_id,
                    ChatMessage::assistant(response_content.clone(), timestamp)
                ).await?;

                Ok(ChatResponse {
                    message: response_content,
                    conversation_id,
                    timestamp,
                })
            }
            Err(e) => {
                error!("Error in Groq API call for conversation {}: {}", conversation_id, e);
                Ok(ChatResponse {
                    message: FALLBACK_MESSAGE.to_string(),
                    conversation_id,
                    timestamp: Utc::now(),
                })
            }
        }
    }

    pub async fn get_history(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, AgentError> {
        Ok(self.history_store.get(conversation_id).await?)
    }

    pub async fn clear_conversation(&self, conversation_id: &str) -> Result<bool, AgentError> {
        let existed = self.history_store.clear(conversation_id).await?;
        if existed {
            info!("Cleared conversation {}", conversation_id);
        }
        Ok(existed)
    }
}
