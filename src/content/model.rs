use serde::{Deserialize, Serialize};

use super::icon::Icon;
use crate::effects::bento::GridSpan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub full_detail: String,
    pub technologies: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub grid_span: Option<GridSpan>,
}

impl Project {
    /// Long-form text for the detail dialog, falling back to the summary.
    pub fn detail(&self) -> &str {
        if self.full_detail.is_empty() {
            &self.description
        } else {
            &self.full_detail
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Work,
    Education,
}

impl EntryKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "work" => Some(EntryKind::Work),
            "education" => Some(EntryKind::Education),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Work => "Work Experience",
            EntryKind::Education => "Education",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            EntryKind::Work => Icon::Briefcase,
            EntryKind::Education => Icon::GraduationCap,
        }
    }
}

/// Experience entry as authored; `type` is checked during validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExperienceRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub organization: String,
    pub duration: String,
    pub description: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceEntry {
    pub id: String,
    pub kind: EntryKind,
    pub title: String,
    pub organization: String,
    pub duration: String,
    pub description: Vec<String>,
    pub achievements: Vec<String>,
}

/// Tech stack entry as authored; `icon` is resolved during validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TechStackRecord {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechStackItem {
    pub name: String,
    pub icon: Icon,
}

/// Work entries first, otherwise in authored order.
pub fn timeline_order(entries: &[ExperienceEntry]) -> Vec<&ExperienceEntry> {
    let mut ordered: Vec<&ExperienceEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.kind != EntryKind::Work);
    ordered
}
