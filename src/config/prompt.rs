use std::fs;
use std::path::Path;
use log::info;
use crate::config::ConfigError;
use crate::models::chat::{ ChatMessage, ChatRole, PromptMessage };

/// Number of stored messages replayed to the model on every turn.
pub const HISTORY_FOR_PROMPT_LEN: usize = 10;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant for a Campus Event Management Platform. You can help users with:

1. **Event Information**: Answer questions about campus events, registration processes, and event details
2. **Platform Features**: Explain how to use the platform's features like event creation, registration, attendance tracking
3. **General Assistance**: Help with navigation, account management, and platform-related queries

Key features of the platform:
- Students can browse and register for events
- Administrators can create and manage events
- Real-time event capacity tracking
- Attendance management and feedback collection
- Analytics dashboard for event insights

Be friendly, helpful, and concise in your responses. If users ask about specific events or account details, remind them that you can provide general guidance but they should check the platform directly for their personal information.";

/// Reads a replacement system prompt from a plain-text file.
pub fn load_system_prompt<P: AsRef<Path>>(path: P) -> Result<String, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::PromptFile {
        path: path.display().to_string(),
        source,
    })?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyPrompt(path.display().to_string()));
    }
    info!("Loaded system prompt from: {}", path.display());
    Ok(trimmed.to_string())
}

/// Builds the message list sent upstream: system prompt, the tail of the
/// stored history, then the new user message.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system_prompt: String,
    history_window: usize,
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}

impl PromptAssembler {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            history_window: HISTORY_FOR_PROMPT_LEN,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn assemble(&self, history: &[ChatMessage], message: &str) -> Vec<PromptMessage> {
        let start = history.len().saturating_sub(self.history_window);
        let window = &history[start..];

        let mut messages = Vec::with_capacity(window.len() + 2);
        messages.push(PromptMessage::new(ChatRole::System, self.system_prompt.as_str()));
        messages.extend(window.iter().map(PromptMessage::from));
        messages.push(PromptMessage::new(ChatRole::User, message));
        messages
    }
}
