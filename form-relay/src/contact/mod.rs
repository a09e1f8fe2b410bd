//! Contact form submissions.
//!
//! ## Processing Flow
//!
//! ```text
//! raw body → parse_body() → FormFields → Submission::from_fields() → compose_sms()
//! ```

pub mod fields;
pub mod message;

use thiserror::Error;
use tracing::info;

pub use fields::{parse_body, trim_field, BodyError, FormFields};
pub use message::{compose_sms, truncate_message, MAX_MESSAGE_CHARS};

/// Error text for a submission without one of its required fields.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, email, and message are required.";

/// A validated contact form submission.
///
/// Lives for a single request and is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub source: String,
}

/// One or more of `name`, `email` and `message` were empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", REQUIRED_FIELDS_MESSAGE)]
pub struct MissingFields {
    pub fields: Vec<&'static str>,
}

impl Submission {
    /// Extract and validate a submission.
    ///
    /// Every field is looked up under its short name first and its
    /// `contact-` prefixed name second, then trimmed.
    pub fn from_fields(fields: &FormFields) -> Result<Self, MissingFields> {
        let submission = Submission {
            name: fields.get_either("name", "contact-name"),
            email: fields.get_either("email", "contact-email"),
            phone: fields.get_either("phone", "contact-phone"),
            message: fields.get_either("message", "contact-message"),
            source: fields.get("source"),
        };

        let missing: Vec<&'static str> = [
            ("name", &submission.name),
            ("email", &submission.email),
            ("message", &submission.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(MissingFields { fields: missing });
        }

        info!(
            email_length = submission.email.len(),
            has_phone = !submission.phone.is_empty(),
            message_chars = submission.message.chars().count(),
            has_source = !submission.source.is_empty(),
            "submission_validated"
        );

        Ok(submission)
    }
}
