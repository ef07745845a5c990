use std::{sync::Arc, time::Duration};

use folio_core_keep_alive_contracts::{KeepAliveService, PingOutcome};
use folio_extern_contracts::ping::PingApiService;
use folio_shared_contracts::time::{format_timestamp, TimeService};
use tokio::time::MissedTickBehavior;
use tracing::{error, info};
use url::Url;

#[derive(Debug, Clone)]
pub struct KeepAliveServiceImpl<Ping, Time> {
    ping: Ping,
    time: Time,
    config: KeepAliveServiceConfig,
}

#[derive(Debug, Clone)]
pub struct KeepAliveServiceConfig {
    pub url: Arc<Url>,
    /// Must not be zero.
    pub interval: Duration,
}

impl<Ping, Time> KeepAliveServiceImpl<Ping, Time> {
    pub fn new(ping: Ping, time: Time, config: KeepAliveServiceConfig) -> Self {
        Self { ping, time, config }
    }
}

impl<Ping, Time> KeepAliveService for KeepAliveServiceImpl<Ping, Time>
where
    Ping: PingApiService,
    Time: TimeService,
{
    async fn ping_once(&self) -> PingOutcome {
        let result = self.ping.ping(&self.config.url).await;
        let timestamp = self.time.now();

        match result {
            Ok(status) => {
                info!(status, "Ping successful: {status} at {}", format_timestamp(timestamp));
                PingOutcome::Alive { status, timestamp }
            }
            Err(err) => {
                error!("Ping failed: {err} at {}", format_timestamp(timestamp));
                PingOutcome::Failed {
                    error: err.to_string(),
                    timestamp,
                }
            }
        }
    }

    async fn run(&self) {
        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            url = %self.config.url,
            interval = ?self.config.interval,
            "Keep-alive service started"
        );

        loop {
            // the first tick completes immediately
            interval.tick().await;
            self.ping_once().await;
        }
    }
}
