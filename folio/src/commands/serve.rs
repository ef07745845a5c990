use std::sync::Arc;

use folio_api_rest::{RestServer, RestServerConfig};
use folio_config::Config;
use folio_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use folio_core_health_impl::HealthServiceImpl;
use folio_email_contracts::EmailService;
use folio_models::email_address::EmailAddressWithName;
use folio_shared_impl::time::TimeServiceImpl;
use folio_templates_impl::TemplateServiceImpl;
use tracing::{error, info};

use crate::email;

const NOT_SET: &str = "NOT SET";

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let smtp = &config.email.smtp;
    info!("SMTP host: {}", smtp.host.as_deref().unwrap_or(NOT_SET));
    info!(
        "SMTP port: {}",
        smtp.port
            .map(|port| port.to_string())
            .unwrap_or_else(|| NOT_SET.into())
    );
    info!(
        "Recipient: {}",
        config.contact.recipient.as_deref().unwrap_or(NOT_SET)
    );

    let recipient = config.contact.recipient.as_deref().and_then(|recipient| {
        recipient
            .parse::<EmailAddressWithName>()
            .inspect_err(|err| error!(recipient, "Invalid recipient address: {err}"))
            .ok()
            .map(Arc::new)
    });

    let email = email::connect(&config.email);
    if email.is_configured() {
        // a failed check is reported but does not keep the server from starting
        let email = email.clone();
        tokio::spawn(async move {
            match email.ping().await {
                Ok(()) => info!("SMTP server is ready to send emails"),
                Err(err) => error!("SMTP connection error: {err:#}"),
            }
        });
    }

    let time = TimeServiceImpl;
    let health = HealthServiceImpl::new(time);
    let template = TemplateServiceImpl::new()?;
    let contact = ContactServiceImpl::new(email, template, ContactServiceConfig { recipient });

    let rest_config =
        RestServerConfig::new(*config.http.request_timeout, &config.http.allowed_origins)?;
    let server = RestServer::new(health, contact, time, rest_config);

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
