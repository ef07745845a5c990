use anyhow::Context;
use clap::Subcommand;
use folio_config::Config;
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_email_impl::EmailServiceImpl;
use folio_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::email::smtp_config;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let smtp = smtp_config(&config.email).context("SMTP settings missing")?;
    let email_service = EmailServiceImpl::new(&smtp)?;

    info!("Connecting to {}:{}", smtp.host, smtp.port);
    email_service
        .ping()
        .await
        .context("Failed to connect to SMTP server")?;

    email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await
        .context("Failed to send email")?;

    info!("Test email sent");
    Ok(())
}
