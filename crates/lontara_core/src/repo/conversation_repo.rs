//! Saved AI chat history.

use crate::config::CHAT_HISTORY_KEY;
use crate::model::chat::Conversation;
use crate::repo::{load_json_array, save_json_array, RepoResult};
use crate::storage::KeyValueStore;

pub trait ConversationRepository {
    /// Saved conversations, newest first. Empty when absent or corrupt.
    fn load_history(&self) -> Vec<Conversation>;
    /// Persists conversations worth keeping.
    ///
    /// A conversation is kept when it has more than the greeting message or
    /// is the active one. When nothing is kept the history key is removed.
    fn save_history(&self, conversations: &[Conversation], active_id: Option<&str>)
        -> RepoResult<()>;
}

pub struct KvConversationRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvConversationRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> ConversationRepository for KvConversationRepository<S> {
    fn load_history(&self) -> Vec<Conversation> {
        load_json_array(&self.store, CHAT_HISTORY_KEY, "conversation_repo")
    }

    fn save_history(
        &self,
        conversations: &[Conversation],
        active_id: Option<&str>,
    ) -> RepoResult<()> {
        let kept: Vec<&Conversation> = conversations
            .iter()
            .filter(|conversation| {
                conversation.has_exchange() || Some(conversation.id.as_str()) == active_id
            })
            .collect();

        if kept.is_empty() {
            self.store.remove(CHAT_HISTORY_KEY)?;
            return Ok(());
        }
        save_json_array(&self.store, CHAT_HISTORY_KEY, &kept)
    }
}
