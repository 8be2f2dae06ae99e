//! Project model matching the upstream Project resource.

use serde::{Deserialize, Serialize};

use super::{Id, ImageUpload};

/// Project category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    #[default]
    Residential,
    Commercial,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 2] =
        [ProjectCategory::Residential, ProjectCategory::Commercial];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Residential => "residential",
            ProjectCategory::Commercial => "commercial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectCategory::Residential => "Residential",
            ProjectCategory::Commercial => "Commercial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "residential" => Some(ProjectCategory::Residential),
            "commercial" => Some(ProjectCategory::Commercial),
            _ => None,
        }
    }
}

/// A completed or showcased project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ProjectCategory,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Values submitted from the project form.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub category: ProjectCategory,
    pub location: String,
    pub featured: bool,
    pub image: Option<ImageUpload>,
}
