use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
pub use duration::Duration;
use serde::Deserialize;
use url::Url;

mod duration;

/// Configuration every deployment starts from.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Colon separated list of additional TOML files, later files take
/// precedence.
pub const CONFIG_PATHS_ENV: &str = "FOLIO_CONFIG";

/// Environment variables and the config keys they override.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "http.port"),
    ("SMTP_HOST", "email.smtp.host"),
    ("SMTP_PORT", "email.smtp.port"),
    ("SMTP_USER", "email.smtp.user"),
    ("SMTP_PASS", "email.smtp.password"),
    ("RECIPIENT_EMAIL", "contact.recipient"),
];

/// Load the configuration of this process: defaults, the files listed in
/// [`CONFIG_PATHS_ENV`], then the [`ENV_OVERRIDES`].
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATHS_ENV).unwrap_or_default();
    let paths = paths
        .split(':')
        .filter(|path| !path.is_empty())
        .collect::<Vec<_>>();

    load_from(&paths, |name| std::env::var(name).ok())
}

pub fn load_from(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    let builder = ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(name, key)| {
            // an empty variable counts as unset
            let value = env(name).filter(|value| !value.is_empty());
            builder.set_override_option(key, value)
        })
        .context("Failed to apply environment overrides")?;

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    pub keep_alive: KeepAliveConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub request_timeout: Duration,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub sender_name: String,
    pub accept_invalid_certs: bool,
    pub timeout: Option<Duration>,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

/// Connection settings of the SMTP server. Emails can only be sent if all of
/// them are set.
#[derive(Default, Deserialize)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactConfig {
    /// Address receiving the contact form submissions.
    pub recipient: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KeepAliveConfig {
    pub url: Url,
    pub interval: Duration,
}
