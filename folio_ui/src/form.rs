use serde::Serialize;
use tracing::{debug, warn};

use crate::client::{ContactApi, ContactApiResponse};

/// Address shown to visitors when the contact backend cannot be reached.
pub const DEFAULT_CONTACT_ADDRESS: &str = "vasavajyotkumar@gmail.com";

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFormFields {
    fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .all(|field| !field.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Error(String),
    Success(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub fields: ContactFormFields,
    pub status: FormStatus,
    /// Set while a submission is in flight.
    pub submitting: bool,
    contact_address: String,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(DEFAULT_CONTACT_ADDRESS)
    }
}

impl ContactForm {
    pub fn new(contact_address: impl Into<String>) -> Self {
        Self {
            fields: ContactFormFields::default(),
            status: FormStatus::Idle,
            submitting: false,
            contact_address: contact_address.into(),
        }
    }

    /// Send the current fields to the backend and update the status.
    ///
    /// Only emptiness is checked here, the email format is left to the
    /// backend. The fields are cleared after a successful submission and kept
    /// otherwise.
    pub async fn submit(&mut self, api: &impl ContactApi) {
        if !self.fields.is_complete() {
            self.status = FormStatus::Error(MISSING_FIELDS_MESSAGE.into());
            return;
        }

        self.submitting = true;
        self.status = FormStatus::Idle;

        self.status = match api.send_message(&self.fields).await {
            Ok(ContactApiResponse::Accepted) => {
                self.fields = ContactFormFields::default();
                FormStatus::Success(SUCCESS_MESSAGE.into())
            }
            Ok(ContactApiResponse::Rejected { error }) => {
                debug!(?error, "submission rejected");
                FormStatus::Error(error.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.into()))
            }
            Err(err) => {
                warn!("failed to reach contact backend: {err:#}");
                FormStatus::Error(format!(
                    "An error occurred. Please try emailing directly at {}",
                    self.contact_address
                ))
            }
        };

        self.submitting = false;
    }
}
