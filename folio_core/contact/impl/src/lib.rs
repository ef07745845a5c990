use std::sync::Arc;

use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_email_contracts::{ContentType, Email, EmailSendError, EmailService};
use folio_models::{contact::ContactSubmission, email_address::EmailAddressWithName};
use folio_templates_contracts::{ContactSubmissionTemplate, TemplateService};
use tracing::warn;

pub const SUBJECT_PREFIX: &str = "Portfolio Contact: ";

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Mailbox of the site owner, every submission is delivered here. Without
    /// one the service is unavailable.
    pub recipient: Option<Arc<EmailAddressWithName>>,
}

impl<Email, Template> ContactServiceImpl<Email, Template> {
    pub fn new(email: Email, template: Template, config: ContactServiceConfig) -> Self {
        Self {
            email,
            template,
            config,
        }
    }
}

impl<EmailS, Template> ContactService for ContactServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    fn is_available(&self) -> bool {
        self.config.recipient.is_some() && self.email.is_configured()
    }

    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let Some(recipient) = self.config.recipient.as_deref() else {
            return Err(ContactSendMessageError::NotConfigured);
        };
        if !self.email.is_configured() {
            return Err(ContactSendMessageError::NotConfigured);
        }

        let email = self.compose(recipient, submission)?;

        self.email.send(email).await.map_err(|err| match err {
            EmailSendError::NotConfigured => ContactSendMessageError::NotConfigured,
            EmailSendError::Other(err) => ContactSendMessageError::Send(err),
        })
    }
}

impl<EmailS, Template> ContactServiceImpl<EmailS, Template>
where
    Template: TemplateService,
{
    fn compose(
        &self,
        recipient: &EmailAddressWithName,
        submission: ContactSubmission,
    ) -> Result<Email, ContactSendMessageError> {
        let ContactSubmission {
            name,
            email,
            subject,
            message,
        } = submission;

        // the submitter pattern is looser than RFC 5322, such addresses are
        // still visible in the body
        let reply_to = email
            .parse::<EmailAddressWithName>()
            .inspect_err(|err| warn!(email = %*email, "omitting reply-to header: {err}"))
            .ok();

        let body = self
            .template
            .render(&ContactSubmissionTemplate {
                name: name.into_inner(),
                email: email.into_inner(),
                subject: (*subject).clone(),
                message: message.into_inner(),
            })
            .map_err(ContactSendMessageError::Send)?;

        Ok(Email {
            recipient: recipient.clone(),
            subject: format!("{SUBJECT_PREFIX}{}", *subject),
            body,
            content_type: ContentType::Html,
            reply_to,
        })
    }
}
