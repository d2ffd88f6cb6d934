//! Hand-authored site content: projects, experience and the tech stack.
//!
//! The records ship as JSON in `content/` and are validated once at startup.

pub mod icon;
pub mod model;
pub mod validate;

use std::fmt;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use icon::{company_icon, Icon};
pub use model::{EntryKind, ExperienceEntry, Metric, Project, TechStackItem};
pub use validate::{IssueCode, ValidationIssue};

use model::{timeline_order, ExperienceRecord, TechStackRecord};

const PROJECTS_JSON: &str = include_str!("../../content/projects.json");
const EXPERIENCE_JSON: &str = include_str!("../../content/experience.json");
const TECH_STACK_JSON: &str = include_str!("../../content/tech_stack.json");

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{collection}: malformed JSON: {source}")]
    Json {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{collection}: {count} invalid field(s){first}", count = .issues.len(), first = FirstIssue(.issues.as_slice()))]
    Invalid {
        collection: &'static str,
        issues: Vec<ValidationIssue>,
    },
}

impl ContentError {
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            ContentError::Invalid { issues, .. } => issues,
            ContentError::Json { .. } => &[],
        }
    }
}

/// Renders `, first: <issue>` when there is one.
struct FirstIssue<'a>(&'a [ValidationIssue]);

impl fmt::Display for FirstIssue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.first() {
            Some(issue) => write!(f, ", first: {issue}"),
            None => Ok(()),
        }
    }
}

fn parse<T: DeserializeOwned>(collection: &'static str, raw: &str) -> Result<Vec<T>, ContentError> {
    serde_json::from_str(raw).map_err(|source| ContentError::Json { collection, source })
}

pub fn parse_projects(raw: &str) -> Result<Vec<Project>, ContentError> {
    validate::validate_projects(parse("projects", raw)?)
        .map_err(|issues| ContentError::Invalid { collection: "projects", issues })
}

pub fn parse_experience(raw: &str) -> Result<Vec<ExperienceEntry>, ContentError> {
    validate::validate_experience(parse::<ExperienceRecord>("experience", raw)?)
        .map_err(|issues| ContentError::Invalid { collection: "experience", issues })
}

pub fn parse_tech_stack(raw: &str) -> Result<Vec<TechStackItem>, ContentError> {
    validate::validate_tech_stack(parse::<TechStackRecord>("tech stack", raw)?)
        .map_err(|issues| ContentError::Invalid { collection: "tech stack", issues })
}

/// Everything the page renders. Each collection is validated on its own, so
/// one bad file only takes down the sections built from it.
#[derive(Debug)]
pub struct SiteContent {
    pub projects: Result<Vec<Project>, ContentError>,
    pub experience: Result<Vec<ExperienceEntry>, ContentError>,
    pub tech_stack: Result<Vec<TechStackItem>, ContentError>,
}

impl SiteContent {
    /// The content compiled into the bundle.
    pub fn bundled() -> Self {
        Self::from_json(PROJECTS_JSON, EXPERIENCE_JSON, TECH_STACK_JSON)
    }

    pub fn from_json(projects: &str, experience: &str, tech_stack: &str) -> Self {
        Self {
            projects: parse_projects(projects),
            experience: parse_experience(experience),
            tech_stack: parse_tech_stack(tech_stack),
        }
    }

    /// Rejected collections, in declaration order.
    pub fn errors(&self) -> impl Iterator<Item = &ContentError> {
        [
            self.projects.as_ref().err(),
            self.experience.as_ref().err(),
            self.tech_stack.as_ref().err(),
        ]
        .into_iter()
        .flatten()
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.as_ref().ok()?.iter().find(|p| p.id == id)
    }

    pub fn timeline(&self) -> Result<Vec<&ExperienceEntry>, &ContentError> {
        self.experience.as_ref().map(|entries| timeline_order(entries))
    }
}
