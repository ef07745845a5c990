use folio_models::contact::ContactSubmissionDraft;
use serde::{Deserialize, Serialize};

/// Body of a contact form submission. Fields are optional here so that
/// missing and empty fields are reported the same way.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiContactSubmission {
    /// Full name of the visitor
    pub name: Option<String>,
    /// Email address of the visitor
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl From<ApiContactSubmission> for ContactSubmissionDraft {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiSendEmailResponse {
    pub message: &'static str,
    pub timestamp: String,
}
