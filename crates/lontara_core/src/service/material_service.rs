//! Learning-material authoring.
//!
//! # Responsibility
//! - Validate editor drafts and keep the in-memory material list.
//! - Announce newly created materials on the global event log.
//!
//! # Invariants
//! - Exactly one `NEW_MATERIAL_TANA_TORAJA` event per created material;
//!   updates never emit events.
//! - An event-log write failure never fails the save.
//! - Only teachers and admins may save materials or delete comments.
//! - Comments are trimmed, never blank, and kept newest first.

use crate::content::{has_media_markup, plain_text_of_html};
use crate::model::event::AppEvent;
use crate::model::material::{Comment, LearningMaterial, MaterialDraft, MaterialId, ALL_CLASSES};
use crate::model::user::SessionUser;
use crate::repo::event_log::EventLogRepository;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialError {
    /// Session role may not author content.
    Forbidden,
    /// A required draft field is blank or zero.
    MissingField(&'static str),
    NotFound(MaterialId),
}

impl Display for MaterialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbidden => write!(f, "only teachers and admins can manage materials"),
            Self::MissingField(field) => write!(f, "material field `{field}` is required"),
            Self::NotFound(id) => write!(f, "material not found: {id}"),
        }
    }
}

impl Error for MaterialError {}

pub struct MaterialService<L: EventLogRepository> {
    events: L,
    materials: Vec<LearningMaterial>,
}

impl<L: EventLogRepository> MaterialService<L> {
    /// Creates a service seeded with `materials`, newest first.
    pub fn new(events: L, materials: Vec<LearningMaterial>) -> Self {
        Self { events, materials }
    }

    pub fn materials(&self) -> &[LearningMaterial] {
        &self.materials
    }

    /// Creates (`draft.id == None`) or updates a material for `author`'s school.
    pub fn save(
        &mut self,
        author: &SessionUser,
        draft: MaterialDraft,
        now: DateTime<Utc>,
    ) -> Result<&LearningMaterial, MaterialError> {
        if !author.role.can_manage_content() {
            return Err(MaterialError::Forbidden);
        }
        validate_draft(&draft)?;

        let target = draft.id;
        match target {
            Some(id) => self.update(author, id, draft),
            None => Ok(self.create(author, draft, now)),
        }
    }

    /// Materials of one school, optionally narrowed to a class.
    ///
    /// Materials targeting every class match any filter.
    pub fn list_for_school(
        &self,
        school_id: &str,
        class_filter: Option<&str>,
    ) -> Vec<&LearningMaterial> {
        self.materials
            .iter()
            .filter(|material| material.school_id == school_id)
            .filter(|material| match class_filter {
                None => true,
                Some(filter) if filter == ALL_CLASSES => true,
                Some(filter) => material.target_class == ALL_CLASSES || material.target_class == filter,
            })
            .collect()
    }

    pub fn get(&self, id: MaterialId) -> Option<&LearningMaterial> {
        self.materials.iter().find(|material| material.id == id)
    }

    /// Flips the favorite flag and returns the new value.
    pub fn toggle_favorite(&mut self, id: MaterialId) -> Result<bool, MaterialError> {
        let material = self
            .materials
            .iter_mut()
            .find(|material| material.id == id)
            .ok_or(MaterialError::NotFound(id))?;
        material.is_favorite = !material.is_favorite;
        Ok(material.is_favorite)
    }

    /// Adds a trimmed comment by `author` and returns it.
    pub fn add_comment(
        &mut self,
        author: &SessionUser,
        material_id: MaterialId,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<&Comment, MaterialError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(MaterialError::MissingField("comment"));
        }
        let material = self
            .materials
            .iter_mut()
            .find(|material| material.id == material_id)
            .ok_or(MaterialError::NotFound(material_id))?;

        let mut stamp = now.timestamp_millis();
        while material
            .comments
            .iter()
            .any(|comment| comment.id == format!("c{stamp}"))
        {
            stamp += 1;
        }
        let id = format!("c{stamp}");
        material.comments.push(Comment {
            id: id.clone(),
            author: author.name.clone(),
            content: content.to_string(),
            user_type: author.role,
            timestamp: now,
        });
        material
            .comments
            .sort_by(|left, right| right.timestamp.cmp(&left.timestamp));
        info!(
            "event=comment_add module=material_service status=ok material_id={material_id} comments={}",
            material.comments.len()
        );

        material
            .comments
            .iter()
            .find(|comment| comment.id == id)
            .ok_or(MaterialError::NotFound(material_id))
    }

    /// Removes a comment; returns whether one was removed.
    pub fn delete_comment(
        &mut self,
        actor: &SessionUser,
        material_id: MaterialId,
        comment_id: &str,
    ) -> Result<bool, MaterialError> {
        if !actor.role.can_manage_content() {
            return Err(MaterialError::Forbidden);
        }
        let material = self
            .materials
            .iter_mut()
            .find(|material| material.id == material_id)
            .ok_or(MaterialError::NotFound(material_id))?;
        let before = material.comments.len();
        material.comments.retain(|comment| comment.id != comment_id);
        Ok(material.comments.len() != before)
    }

    fn create(
        &mut self,
        author: &SessionUser,
        draft: MaterialDraft,
        now: DateTime<Utc>,
    ) -> &LearningMaterial {
        let material = LearningMaterial {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            target_class: draft.target_class.unwrap_or_else(|| ALL_CLASSES.to_string()),
            learning_objectives: draft.learning_objectives,
            learning_goals: draft.learning_goals,
            graduate_profile: draft.graduate_profile,
            duration_jp: draft.duration_jp,
            video_url: draft.video_url,
            school_id: author.school_id.clone(),
            views: 0,
            rating: 0.0,
            reviews: 0,
            is_favorite: false,
            comments: Vec::new(),
        };

        let event = AppEvent::new_material(material.title.clone(), now);
        match self.events.append_event(&event) {
            Ok(()) => info!(
                "event=material_publish module=material_service status=ok material_id={}",
                material.id
            ),
            Err(err) => warn!(
                "event=material_publish module=material_service status=error material_id={} error={err}",
                material.id
            ),
        }

        self.materials.insert(0, material);
        &self.materials[0]
    }

    fn update(
        &mut self,
        author: &SessionUser,
        id: MaterialId,
        draft: MaterialDraft,
    ) -> Result<&LearningMaterial, MaterialError> {
        let material = self
            .materials
            .iter_mut()
            .find(|material| material.id == id)
            .ok_or(MaterialError::NotFound(id))?;

        material.title = draft.title;
        material.content = draft.content;
        if let Some(target_class) = draft.target_class {
            material.target_class = target_class;
        }
        material.learning_objectives = draft.learning_objectives;
        material.learning_goals = draft.learning_goals;
        material.graduate_profile = draft.graduate_profile;
        material.duration_jp = draft.duration_jp;
        material.video_url = draft.video_url;
        material.school_id = author.school_id.clone();
        Ok(&*material)
    }
}

fn validate_draft(draft: &MaterialDraft) -> Result<(), MaterialError> {
    if draft.title.trim().is_empty() {
        return Err(MaterialError::MissingField("title"));
    }
    if draft.learning_objectives.trim().is_empty() {
        return Err(MaterialError::MissingField("learning_objectives"));
    }
    if draft.learning_goals.trim().is_empty() {
        return Err(MaterialError::MissingField("learning_goals"));
    }
    if draft.graduate_profile.is_empty() {
        return Err(MaterialError::MissingField("graduate_profile"));
    }
    if plain_text_of_html(&draft.content).is_empty() && !has_media_markup(&draft.content) {
        return Err(MaterialError::MissingField("content"));
    }
    if draft.duration_jp == 0 {
        return Err(MaterialError::MissingField("duration_jp"));
    }
    Ok(())
}
