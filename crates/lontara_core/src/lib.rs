//! Core domain logic for the Lontara school portal.
//! This crate is the single source of truth for notification, material and
//! chat invariants; UI shells only render what it returns.

pub mod config;
pub mod content;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::NotificationPolicy;
pub use content::{has_media_markup, AspectRatio, ContentError, RichDocument};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::assessment::{
    AnswerValue, Assessment, AssessmentType, Question, StudentAnswer, StudentScore,
};
pub use model::chat::{ChatMessage, Conversation, ImageAttachment, Sender};
pub use model::event::{AppEvent, EventKind, NEW_MATERIAL_EVENT_TYPE};
pub use model::material::{Comment, LearningMaterial, MaterialDraft, MaterialId};
pub use model::notification::{notification_id_for, Notification, NotificationId};
pub use model::user::{SessionUser, UserRole};
pub use repo::conversation_repo::{ConversationRepository, KvConversationRepository};
pub use repo::event_log::{EventLogRepository, KvEventLog};
pub use repo::notification_repo::{
    notification_storage_key, KvNotificationRepository, NotificationRepository,
};
pub use repo::{RepoError, RepoResult};
pub use service::assessment_service::{score_answers, AssessmentError, AssessmentService};
pub use service::chat_service::{ChatBackend, ChatError, ChatService, CHAT_FAILURE_MESSAGE};
pub use service::elapsed::{elapsed_since, time_ago, Elapsed};
pub use service::material_service::{MaterialError, MaterialService};
pub use service::notification_panel::{NotificationPanel, PanelRow, PointerTarget};
pub use service::notification_service::NotificationCenter;
pub use service::reconcile::reconcile;
pub use storage::{KeyValueStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
