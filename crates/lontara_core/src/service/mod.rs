//! Use-case services over the repositories.
//!
//! # Responsibility
//! - Orchestrate repository calls into session-level APIs.
//! - Keep callers decoupled from storage keys and encoding.

pub mod assessment_service;
pub mod chat_service;
pub mod elapsed;
pub mod material_service;
pub mod notification_panel;
pub mod notification_service;
pub mod reconcile;
