//! Session identity supplied by the login collaborator.

use serde::{Deserialize, Serialize};

/// School portal role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Teacher.
    Guru,
    /// Student.
    Siswa,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guru => "guru",
            Self::Siswa => "siswa",
            Self::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "guru" => Some(Self::Guru),
            "siswa" => Some(Self::Siswa),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Roles allowed to author materials and assessments.
    pub fn can_manage_content(self) -> bool {
        matches!(self, Self::Guru | Self::Admin)
    }
}

/// Active user of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionUser {
    pub role: UserRole,
    /// Display name; also the notification partition discriminator.
    pub name: String,
    pub school_id: String,
}

impl SessionUser {
    pub fn new(role: UserRole, name: impl Into<String>, school_id: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
            school_id: school_id.into(),
        }
    }
}
