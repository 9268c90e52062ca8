//! Learning materials authored by teachers and admins.

use crate::model::user::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable material identifier.
pub type MaterialId = Uuid;

/// Class filter value meaning "no class restriction".
pub const ALL_CLASSES: &str = "Semua Kelas";

/// Published learning material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningMaterial {
    pub id: MaterialId,
    pub title: String,
    /// Sanitized rich-content HTML produced by `content::RichDocument`.
    pub content: String,
    pub target_class: String,
    /// Capaian pembelajaran.
    pub learning_objectives: String,
    /// Tujuan pembelajaran.
    pub learning_goals: String,
    /// Profil lulusan.
    pub graduate_profile: Vec<String>,
    /// Duration in lesson hours (JP).
    pub duration_jp: u32,
    pub video_url: Option<String>,
    pub school_id: String,
    pub views: u32,
    pub rating: f32,
    pub reviews: u32,
    pub is_favorite: bool,
    /// Newest first.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Discussion entry under a material; id is `c<epoch ms>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub content: String,
    pub user_type: UserRole,
    #[serde(with = "crate::model::timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Editor output submitted for create (`id == None`) or update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaterialDraft {
    pub id: Option<MaterialId>,
    pub title: String,
    pub content: String,
    pub target_class: Option<String>,
    pub learning_objectives: String,
    pub learning_goals: String,
    pub graduate_profile: Vec<String>,
    pub duration_jp: u32,
    pub video_url: Option<String>,
}
