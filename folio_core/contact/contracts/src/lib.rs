use std::future::Future;

use folio_models::contact::ContactSubmission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Whether submissions can be delivered at all.
    fn is_available(&self) -> bool;

    /// Forward a submission to the site owner as one email.
    ///
    /// Every call sends a new email, identical submissions are not
    /// deduplicated.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Email service not configured properly")]
    NotConfigured,
    #[error(transparent)]
    Send(anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_is_available(mut self, available: bool) -> Self {
        self.expect_is_available().return_const(available);
        self
    }

    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
