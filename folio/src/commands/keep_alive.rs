use anyhow::{bail, ensure};
use clap::Args;
use folio_config::Config;
use folio_core_keep_alive_contracts::{KeepAliveService, PingOutcome};
use folio_core_keep_alive_impl::{KeepAliveServiceConfig, KeepAliveServiceImpl};
use folio_extern_impl::ping::PingApiServiceImpl;
use folio_shared_impl::time::TimeServiceImpl;
use url::Url;

#[derive(Debug, Args)]
pub struct KeepAliveCommand {
    /// Liveness route to ping [default: keep_alive.url]
    #[arg(long)]
    url: Option<Url>,
    /// Time between two pings, e.g. `10m` [default: keep_alive.interval]
    #[arg(long)]
    interval: Option<folio_config::Duration>,
    /// Ping a single time and exit, failing if the ping failed
    #[arg(long)]
    once: bool,
}

impl KeepAliveCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let url = self.url.unwrap_or(config.keep_alive.url);
        let interval: std::time::Duration =
            self.interval.unwrap_or(config.keep_alive.interval).into();
        ensure!(!interval.is_zero(), "Keep-alive interval must not be zero");

        let service = KeepAliveServiceImpl::new(
            PingApiServiceImpl::new()?,
            TimeServiceImpl,
            KeepAliveServiceConfig {
                url: url.into(),
                interval,
            },
        );

        if self.once {
            if let PingOutcome::Failed { error, .. } = service.ping_once().await {
                bail!("Ping failed: {error}");
            }
            return Ok(());
        }

        service.run().await;
        Ok(())
    }
}
