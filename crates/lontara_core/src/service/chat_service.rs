//! AI history assistant.
//!
//! # Responsibility
//! - Wrap the opaque generation backend with a never-failing reply API.
//! - Keep conversations and persist them through `ConversationRepository`.
//!
//! # Invariants
//! - Backend failures become `CHAT_FAILURE_MESSAGE`; nothing is retried.
//! - Replies never contain `*`.
//! - There is always an active conversation.

use crate::model::chat::{ChatMessage, Conversation, ImageAttachment};
use crate::repo::conversation_repo::ConversationRepository;
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const CHAT_FAILURE_MESSAGE: &str =
    "Maaf, terjadi kesalahan saat mencoba menghubungi AI. Silakan coba lagi nanti.";
pub const CHAT_GREETING: &str = "Halo! Tanyakan apapun tentang sejarah dan budaya Tana Toraja, Luwu, Luwu Utara, dan Palopo. Anda juga bisa mengirim gambar untuk dianalisis.";
pub const NEW_CONVERSATION_TITLE: &str = "Percakapan Baru";
pub const IMAGE_CONVERSATION_TITLE: &str = "Analisis Gambar";
/// Prompt used when an image is sent without text.
pub const DEFAULT_IMAGE_PROMPT: &str = "Analisis gambar ini secara mendalam dari sudut pandang seorang sejarawan. Identifikasi lokasi, objek, orang, dan konteks budaya yang terlihat, dengan fokus khusus pada sejarah Sulawesi Selatan. Sajikan jawaban Anda dalam format akademis dan sertakan referensi beserta URL jika tersedia.";

const TITLE_MAX_CHARS: usize = 35;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    Backend(String),
    EmptyResponse,
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(message) => write!(f, "chat backend failed: {message}"),
            Self::EmptyResponse => write!(f, "chat backend returned no text"),
        }
    }
}

impl Error for ChatError {}

/// Opaque text generation backend.
pub trait ChatBackend {
    fn generate(&self, prompt: &str, image: Option<&ImageAttachment>) -> Result<String, ChatError>;
}

/// Asks `backend` and degrades every failure to `CHAT_FAILURE_MESSAGE`.
pub fn generate_reply<B: ChatBackend + ?Sized>(
    backend: &B,
    prompt: &str,
    image: Option<&ImageAttachment>,
) -> String {
    let effective_prompt = if prompt.trim().is_empty() && image.is_some() {
        DEFAULT_IMAGE_PROMPT
    } else {
        prompt
    };

    match backend.generate(effective_prompt, image) {
        Ok(text) if !text.trim().is_empty() => text.replace('*', ""),
        Ok(_) => {
            warn!("event=chat_generate module=chat_service status=error error={}", ChatError::EmptyResponse);
            CHAT_FAILURE_MESSAGE.to_string()
        }
        Err(err) => {
            warn!("event=chat_generate module=chat_service status=error error={err}");
            CHAT_FAILURE_MESSAGE.to_string()
        }
    }
}

pub struct ChatService<B: ChatBackend, R: ConversationRepository> {
    backend: B,
    history: R,
    conversations: Vec<Conversation>,
    active_id: String,
}

impl<B: ChatBackend, R: ConversationRepository> ChatService<B, R> {
    /// Restores saved history, or starts a fresh conversation when none is
    /// readable.
    pub fn new(backend: B, history: R) -> Self {
        let conversations = history.load_history();
        let mut service = Self {
            backend,
            history,
            active_id: String::new(),
            conversations: Vec::new(),
        };

        match conversations.first().map(|conversation| conversation.id.clone()) {
            Some(first_id) => {
                service.conversations = conversations;
                service.active_id = first_id;
            }
            None => service.new_conversation(),
        }
        service
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|conversation| conversation.id == self.active_id)
    }

    /// Starts a new conversation and drops other greeting-only ones.
    pub fn new_conversation(&mut self) {
        let id = self.next_conversation_id();
        self.conversations.retain(Conversation::has_exchange);
        self.conversations.insert(
            0,
            Conversation {
                id: id.clone(),
                title: NEW_CONVERSATION_TITLE.to_string(),
                messages: vec![ChatMessage::ai(CHAT_GREETING)],
            },
        );
        self.active_id = id;
        self.persist();
    }

    /// Returns `false` when `id` is unknown.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.conversations.iter().any(|conversation| conversation.id == id) {
            return false;
        }
        self.active_id = id.to_string();
        self.persist();
        true
    }

    pub fn delete(&mut self, id: &str) {
        self.conversations.retain(|conversation| conversation.id != id);
        if self.active_id != id {
            self.persist();
            return;
        }
        match self.conversations.first().map(|conversation| conversation.id.clone()) {
            Some(first_id) => {
                self.active_id = first_id;
                self.persist();
            }
            None => self.new_conversation(),
        }
    }

    /// Sends a prompt in the active conversation and returns the reply.
    ///
    /// Returns `None` without contacting the backend when there is neither
    /// text nor an image.
    pub fn send(
        &mut self,
        prompt: &str,
        image: Option<ImageAttachment>,
    ) -> Option<String> {
        if prompt.trim().is_empty() && image.is_none() {
            return None;
        }

        let image_url = image
            .as_ref()
            .map(|attachment| format!("data:{};base64,{}", attachment.mime_type, attachment.data));
        let first_title = prompt.trim().chars().take(TITLE_MAX_CHARS).collect::<String>();
        if let Some(conversation) = self.active_mut() {
            conversation.messages.push(ChatMessage::user(prompt, image_url));
            if conversation.messages.len() == 2 {
                conversation.title = if first_title.is_empty() {
                    IMAGE_CONVERSATION_TITLE.to_string()
                } else {
                    first_title
                };
            }
        }

        let reply = generate_reply(&self.backend, prompt, image.as_ref());
        if let Some(conversation) = self.active_mut() {
            conversation.messages.push(ChatMessage::ai(reply.clone()));
        }
        info!(
            "event=chat_send module=chat_service status=ok with_image={}",
            image.is_some()
        );
        self.persist();
        Some(reply)
    }

    fn active_mut(&mut self) -> Option<&mut Conversation> {
        let active_id = self.active_id.clone();
        self.conversations
            .iter_mut()
            .find(|conversation| conversation.id == active_id)
    }

    fn next_conversation_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self
            .conversations
            .iter()
            .any(|conversation| conversation.id == candidate.to_string())
        {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn persist(&self) {
        if let Err(err) = self
            .history
            .save_history(&self.conversations, Some(self.active_id.as_str()))
        {
            warn!("event=chat_history_save module=chat_service status=error error={err}");
        }
    }
}
