use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::atomic::{ AtomicU64, Ordering };
use std::sync::{ RwLock, RwLockReadGuard, RwLockWriteGuard };
use crate::history::{ HistoryError, HistoryStore };
use crate::models::chat::ChatMessage;

struct Conversation {
    messages: Vec<ChatMessage>,
    // Value of the store's activity clock at the last create/append.
    last_activity: u64,
}

/// Process-local conversation store.
///
/// `max_conversations == 0` keeps every conversation until it is cleared.
/// Otherwise opening a new conversation past the cap evicts the one with the
/// oldest activity.
pub struct InMemoryHistoryStore {
    conversations: RwLock<HashMap<String, Conversation>>,
    activity_clock: AtomicU64,
    max_conversations: usize,
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(max_conversations: usize) -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
            activity_clock: AtomicU64::new(0),
            max_conversations,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Conversation>>, HistoryError> {
        self.conversations.read().map_err(|_| HistoryError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Conversation>>, HistoryError> {
        self.conversations.write().map_err(|_| HistoryError::Poisoned)
    }

    fn tick(&self) -> u64 {
        self.activity_clock.fetch_add(1, Ordering::Relaxed)
    }

    fn ensure_entry<'a>(
        &self,
        map: &'a mut HashMap<String, Conversation>,
        conversation_id: &str
    ) -> &'a mut Conversation {
        let at_capacity = self.max_conversations > 0 && map.len() >= self.max_conversations;
        if at_capacity && !map.contains_key(conversation_id) {
            evict_oldest(map);
        }
        let now = self.tick();
        map.entry(conversation_id.to_string()).or_insert_with(|| Conversation {
            messages: Vec::new(),
            last_activity: now,
        })
    }
}

fn evict_oldest(map: &mut HashMap<String, Conversation>) {
    let oldest = map
        .iter()
        .min_by_key(|(_, conv)| conv.last_activity)
        .map(|(id, _)| id.clone());
    if let Some(id) = oldest {
        debug!("Evicting least recently active conversation {}", id);
        map.remove(&id);
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn create(&self, conversation_id: &str) -> Result<(), HistoryError> {
        let mut map = self.write()?;
        self.ensure_entry(&mut map, conversation_id);
        Ok(())
    }

    async fn get(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, HistoryError> {
        let map = self.read()?;
        Ok(
            map
                .get(conversation_id)
                .map(|conv| conv.messages.clone())
                .unwrap_or_default()
        )
    }

    async fn append(&self, conversation_id: &str, message: ChatMessage) -> Result<(), HistoryError> {
        let mut map = self.write()?;
        let now = self.tick();
        let conv = self.ensure_entry(&mut map, conversation_id);
        conv.last_activity = now;
        conv.messages.push(message);
        Ok(())
    }

    async fn clear(&self, conversation_id: &str) -> Result<bool, HistoryError> {
        let mut map = self.write()?;
        Ok(map.remove(conversation_id).is_some())
    }

    async fn len(&self) -> Result<usize, HistoryError> {
        Ok(self.read()?.len())
    }
}
