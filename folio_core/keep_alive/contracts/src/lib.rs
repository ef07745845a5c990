use std::future::Future;

use chrono::{DateTime, Utc};

pub trait KeepAliveService: Send + Sync + 'static {
    /// Ping the liveness route once and log the outcome.
    fn ping_once(&self) -> impl Future<Output = PingOutcome> + Send;

    /// Ping immediately, then once per interval until the process is
    /// terminated. Failed pings wait for the next tick, there is no retry.
    fn run(&self) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PingOutcome {
    Alive {
        status: u16,
        timestamp: DateTime<Utc>,
    },
    Failed {
        error: String,
        timestamp: DateTime<Utc>,
    },
}
