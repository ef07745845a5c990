use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;
use thiserror::Error;

/// Pattern a submitter address has to match: something, an `@`, something, a
/// `.`, something, where none of the parts contain whitespace or `@`.
pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A message a visitor sent through the contact form.
///
/// Values of this type have passed validation: every field is non-empty and
/// the email matches [`CONTACT_EMAIL_REGEX`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: ContactSubject,
    pub message: ContactContent,
}

/// The unvalidated shape of a contact form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmissionDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
}

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactName(String);

#[nutype(
    validate(regex = CONTACT_EMAIL_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactEmail(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactSubject(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactContent(String);

impl TryFrom<ContactSubmissionDraft> for ContactSubmission {
    type Error = ContactValidationError;

    fn try_from(draft: ContactSubmissionDraft) -> Result<Self, Self::Error> {
        let (Some(name), Some(email), Some(subject), Some(message)) = (
            present(draft.name),
            present(draft.email),
            present(draft.subject),
            present(draft.message),
        ) else {
            return Err(ContactValidationError::MissingFields);
        };

        let email =
            ContactEmail::try_new(email).map_err(|_| ContactValidationError::InvalidEmail)?;

        Ok(Self {
            name: ContactName::try_new(name).map_err(|_| ContactValidationError::MissingFields)?,
            email,
            subject: ContactSubject::try_new(subject)
                .map_err(|_| ContactValidationError::MissingFields)?,
            message: ContactContent::try_new(message)
                .map_err(|_| ContactValidationError::MissingFields)?,
        })
    }
}

/// Whitespace counts as content, only empty or absent values are missing.
fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
