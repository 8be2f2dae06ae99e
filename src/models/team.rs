//! Team member model matching the upstream TeamMember resource.

use serde::{Deserialize, Serialize};

use super::{Id, ImageUpload};

/// A member of the firm shown on the team section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    /// Display sequence, ascending
    #[serde(default)]
    pub order: i64,
    #[serde(default, rename = "isCEO")]
    pub is_ceo: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Values submitted from the team member form.
#[derive(Debug, Clone, Default)]
pub struct TeamDraft {
    pub name: String,
    pub role: String,
    pub description: String,
    /// `None` when the field was left blank
    pub order: Option<i64>,
    pub is_ceo: bool,
    pub image: Option<ImageUpload>,
}
