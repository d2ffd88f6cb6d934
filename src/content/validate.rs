//! Field-level checks for authored content. A collection either validates as a
//! whole or yields every issue found; invalid records are never half-used.

use std::fmt;

use serde::Serialize;
use url::Url;

use super::icon::Icon;
use super::model::{EntryKind, ExperienceEntry, ExperienceRecord, Project, TechStackItem, TechStackRecord};
use crate::effects::bento::{MAX_SPAN_COLS, MAX_SPAN_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    TooSmall,
    TooBig,
    InvalidUrl,
    InvalidEnumValue,
    UnknownIcon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub code: IssueCode,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn push(&mut self, path: String, code: IssueCode, message: String) {
        self.issues.push(ValidationIssue { path, code, message });
    }

    fn text(&mut self, path: String, value: &str, min: usize, max: Option<usize>) {
        let len = value.chars().count();
        if len < min {
            self.push(
                path,
                IssueCode::TooSmall,
                format!("must contain at least {min} character(s)"),
            );
        } else if let Some(max) = max.filter(|max| len > *max) {
            self.push(
                path,
                IssueCode::TooBig,
                format!("must contain at most {max} character(s)"),
            );
        }
    }

    fn list<T>(&mut self, path: String, items: &[T], min: usize) {
        if items.len() < min {
            self.push(
                path,
                IssueCode::TooSmall,
                format!("must contain at least {min} element(s)"),
            );
        }
    }

    fn url(&mut self, path: String, value: Option<&str>) {
        if let Some(raw) = value {
            if Url::parse(raw).is_err() {
                self.push(path, IssueCode::InvalidUrl, format!("invalid url: {raw}"));
            }
        }
    }

    fn bounded(&mut self, path: String, value: u8, min: u8, max: u8) {
        if value < min {
            self.push(path, IssueCode::TooSmall, format!("must be at least {min}"));
        } else if value > max {
            self.push(path, IssueCode::TooBig, format!("must be at most {max}"));
        }
    }

    fn finish<T>(self, value: T) -> Result<T, Vec<ValidationIssue>> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            Err(self.issues)
        }
    }
}

pub fn validate_projects(records: Vec<Project>) -> Result<Vec<Project>, Vec<ValidationIssue>> {
    let mut check = Checker::default();
    for (i, p) in records.iter().enumerate() {
        let at = |field: &str| format!("[{i}].{field}");
        check.text(at("id"), &p.id, 1, None);
        check.text(at("title"), &p.title, 1, Some(100));
        check.text(at("company"), &p.company, 1, None);
        check.text(at("description"), &p.description, 10, Some(500));
        check.list(at("technologies"), &p.technologies, 1);
        check.url(at("repoUrl"), p.repo_url.as_deref());
        check.url(at("demoUrl"), p.demo_url.as_deref());
        if let Some(span) = p.grid_span {
            check.bounded(at("gridSpan.cols"), span.cols, 1, MAX_SPAN_COLS);
            check.bounded(at("gridSpan.rows"), span.rows, 1, MAX_SPAN_ROWS);
        }
    }
    check.finish(records)
}

pub fn validate_experience(
    records: Vec<ExperienceRecord>,
) -> Result<Vec<ExperienceEntry>, Vec<ValidationIssue>> {
    let mut check = Checker::default();
    let mut entries = Vec::with_capacity(records.len());
    for (i, r) in records.into_iter().enumerate() {
        let at = |field: &str| format!("[{i}].{field}");
        check.text(at("id"), &r.id, 1, None);
        check.text(at("title"), &r.title, 1, Some(100));
        check.text(at("organization"), &r.organization, 1, Some(100));
        check.text(at("duration"), &r.duration, 1, None);
        check.list(at("description"), &r.description, 1);
        let Some(kind) = EntryKind::from_name(&r.kind) else {
            check.push(
                at("type"),
                IssueCode::InvalidEnumValue,
                format!("expected 'work' | 'education', received '{}'", r.kind),
            );
            continue;
        };
        entries.push(ExperienceEntry {
            id: r.id,
            kind,
            title: r.title,
            organization: r.organization,
            duration: r.duration,
            description: r.description,
            achievements: r.achievements,
        });
    }
    check.finish(entries)
}

pub fn validate_tech_stack(
    records: Vec<TechStackRecord>,
) -> Result<Vec<TechStackItem>, Vec<ValidationIssue>> {
    let mut check = Checker::default();
    let mut items = Vec::with_capacity(records.len());
    for (i, r) in records.into_iter().enumerate() {
        check.text(format!("[{i}].name"), &r.name, 1, Some(50));
        check.text(format!("[{i}].icon"), &r.icon, 1, None);
        match Icon::from_name(&r.icon) {
            Some(icon) => items.push(TechStackItem { name: r.name, icon }),
            None if r.icon.is_empty() => {}
            None => check.push(
                format!("[{i}].icon"),
                IssueCode::UnknownIcon,
                format!("unknown icon '{}'", r.icon),
            ),
        }
    }
    check.finish(items)
}
