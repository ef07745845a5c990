use std::time::Duration;

use anyhow::{anyhow, Context};
use folio_email_contracts::{ContentType, Email, EmailSendError, EmailService};
use folio_utils::Apply;
use lettre::{
    message::{header, Mailbox, MessageBuilder},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, trace};

/// Port on which SMTP servers expect TLS right from the start of the
/// connection. Every other port negotiates STARTTLS if the server offers it.
pub const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Used to log in and as the sender address of every email.
    pub username: String,
    pub password: String,
    /// Display name of the sender mailbox.
    pub sender_name: String,
    /// Skip certificate verification of the SMTP server.
    ///
    /// Some managed SMTP providers present certificates that do not verify.
    /// Turning this on makes the connection vulnerable to interception.
    pub accept_invalid_certs: bool,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    smtp: Option<Smtp>,
}

#[derive(Debug, Clone)]
struct Smtp {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    /// Set up a pooled SMTP transport. No connection is opened until the
    /// first email is sent or [`EmailService::ping`] is called.
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let address = config
            .username
            .parse::<Address>()
            .with_context(|| format!("SMTP user {:?} is not an email address", config.username))?;
        let from = Mailbox::new(Some(config.sender_name.clone()), address);

        let tls = TlsParameters::builder(config.host.clone())
            .dangerous_accept_invalid_certs(config.accept_invalid_certs)
            .build_rustls()
            .context("Failed to set up TLS parameters")?;
        let tls = if config.port == IMPLICIT_TLS_PORT {
            Tls::Wrapper(tls)
        } else {
            Tls::Opportunistic(tls)
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(config.timeout)
            .build();

        Ok(Self {
            smtp: Some(Smtp { from, transport }),
        })
    }

    /// A service without transport, rejecting every email.
    pub fn unconfigured() -> Self {
        Self { smtp: None }
    }
}

impl EmailService for EmailServiceImpl {
    fn is_configured(&self) -> bool {
        self.smtp.is_some()
    }

    async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        let Some(smtp) = &self.smtp else {
            return Err(EmailSendError::NotConfigured);
        };

        let message = Message::builder()
            .from(smtp.from.clone())
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)
            .map_err(anyhow::Error::from)?;

        trace!(from = %smtp.from, "handing message to smtp transport");
        let response = smtp
            .transport
            .send(message)
            .await
            .map_err(anyhow::Error::from)?;

        if !response.is_positive() {
            return Err(anyhow!("SMTP server rejected the message ({})", response.code()).into());
        }

        debug!(code = %response.code(), "smtp server accepted the message");
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let smtp = self
            .smtp
            .as_ref()
            .ok_or_else(|| anyhow!("Email transport is not configured"))?;

        smtp.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
