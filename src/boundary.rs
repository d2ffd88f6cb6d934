//! Keeps a failing section from taking the rest of the page down.

use crate::error::SiteError;

pub const FALLBACK_TEXT: &str = "Content temporarily unavailable";

#[derive(Debug)]
pub enum Contained<T> {
    Rendered(T),
    Fallback,
}

impl<T> Contained<T> {
    pub fn rendered(self) -> Option<T> {
        match self {
            Contained::Rendered(value) => Some(value),
            Contained::Fallback => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Contained::Fallback)
    }
}

/// Run one section renderer. Errors are logged in debug builds only and
/// turned into [`Contained::Fallback`] so the caller can show
/// [`FALLBACK_TEXT`] in place of the section.
pub fn contain<T>(section: &str, render: impl FnOnce() -> Result<T, SiteError>) -> Contained<T> {
    match render() {
        Ok(value) => Contained::Rendered(value),
        Err(err) => {
            if cfg!(debug_assertions) {
                log::error!("{section}: render failed: {err}");
            }
            Contained::Fallback
        }
    }
}
