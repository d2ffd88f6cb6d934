use serde::Serialize;
use thiserror::Error;

pub const SENT_TITLE: &str = "Message Sent!";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again or email me directly.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("a message is already being sent")]
    Busy,

    #[error("form endpoint answered HTTP {0}")]
    Rejected(u16),

    #[error("network error: {0}")]
    Network(String),
}

impl ContactError {
    /// Text shown under the form.
    pub fn user_message(&self) -> String {
        match self {
            ContactError::Rejected(_) | ContactError::Network(_) => FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        for field in Field::ALL {
            if self.get(field).trim().is_empty() {
                return Err(ContactError::Missing(field.id()));
            }
        }
        if !looks_like_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

fn looks_like_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !raw.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(ContactError),
}

/// Contact form state. One submission at a time, no automatic retry: a failed
/// send keeps the fields so the visitor can resubmit.
#[derive(Debug, Default)]
pub struct ContactController {
    form: ContactForm,
    status: FormStatus,
}

impl ContactController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if self.status != FormStatus::Submitting {
            self.form.set(field, value);
        }
    }

    pub fn inputs_disabled(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Validate and move to `Submitting`, returning the JSON body to post.
    pub fn begin_submit(&mut self) -> Result<String, ContactError> {
        if self.status == FormStatus::Submitting {
            return Err(ContactError::Busy);
        }
        if let Err(err) = self.form.validate() {
            self.status = FormStatus::Failed(err.clone());
            return Err(err);
        }
        let body = serde_json::to_string(&self.form)
            .map_err(|e| ContactError::Network(e.to_string()))?;
        self.status = FormStatus::Submitting;
        Ok(body)
    }

    /// Apply the network outcome of the pending submission.
    pub fn finish(&mut self, outcome: Result<(), ContactError>) {
        if self.status != FormStatus::Submitting {
            log::warn!("contact: ignoring result with no submission pending");
            return;
        }
        match outcome {
            Ok(()) => {
                log::info!("contact: message sent");
                self.form = ContactForm::default();
                self.status = FormStatus::Succeeded;
            }
            Err(err) => {
                log::warn!("contact: {err}");
                self.status = FormStatus::Failed(err);
            }
        }
    }

    /// "Send another message": back to an empty idle form.
    pub fn reset(&mut self) {
        self.form = ContactForm::default();
        self.status = FormStatus::Idle;
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.status {
            FormStatus::Failed(err) => Some(err.user_message()),
            _ => None,
        }
    }
}
