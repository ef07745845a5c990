use folio_config::EmailConfig;
use folio_email_impl::{EmailServiceImpl, SmtpConfig};
use tracing::error;

/// Collect the SMTP connection settings, `None` if any of them is missing.
pub fn smtp_config(config: &EmailConfig) -> Option<SmtpConfig> {
    let smtp = &config.smtp;
    Some(SmtpConfig {
        host: smtp.host.clone()?,
        port: smtp.port?,
        username: smtp.user.clone()?,
        password: smtp.password.clone()?,
        sender_name: config.sender_name.clone(),
        accept_invalid_certs: config.accept_invalid_certs,
        timeout: config.timeout.map(Into::into),
    })
}

/// Set up the email transport. Missing or invalid settings leave the service
/// unconfigured, the server still starts and reports the problem per request.
pub fn connect(config: &EmailConfig) -> EmailServiceImpl {
    let Some(smtp) = smtp_config(config) else {
        error!("SMTP settings missing, emails cannot be sent");
        return EmailServiceImpl::unconfigured();
    };

    EmailServiceImpl::new(&smtp).unwrap_or_else(|err| {
        error!("Invalid SMTP settings, emails cannot be sent: {err:#}");
        EmailServiceImpl::unconfigured()
    })
}
