mod memory;

use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use thiserror::Error;
use crate::models::chat::ChatMessage;

pub use memory::InMemoryHistoryStore;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history store lock poisoned")]
    Poisoned,
}

/// Storage of conversations keyed by conversation id.
///
/// Reads never fail for an unknown id: they return an empty history. The
/// store keeps every appended message; windowing for the prompt happens in
/// [`crate::config::prompt::PromptAssembler`].
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Registers an empty conversation. Existing conversations are left alone.
    async fn create(&self, conversation_id: &str) -> Result<(), HistoryError>;

    async fn get(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, HistoryError>;

    /// Appends to the conversation, creating it if absent.
    async fn append(&self, conversation_id: &str, message: ChatMessage) -> Result<(), HistoryError>;

    /// Removes the conversation. Returns whether it existed.
    async fn clear(&self, conversation_id: &str) -> Result<bool, HistoryError>;

    async fn len(&self) -> Result<usize, HistoryError>;
}

pub fn initialize_history_store(max_conversations: usize) -> Arc<dyn HistoryStore> {
    if max_conversations == 0 {
        info!("Chat history will be kept in memory without a conversation cap");
    } else {
        info!("Chat history will be kept in memory, capped at {} conversations", max_conversations);
    }
    Arc::new(InMemoryHistoryStore::with_capacity(max_conversations))
}
