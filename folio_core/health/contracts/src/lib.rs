use std::time::Duration;

use chrono::{DateTime, Utc};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait HealthService: Send + Sync + 'static {
    /// Status of the running process, reported on the root route.
    fn get_status(&self) -> HealthStatus;

    /// Minimal liveness answer for the keep-alive pinger. Independent of the
    /// state of any other service.
    fn ping(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub timestamp: DateTime<Utc>,
    pub uptime: Duration,
}

#[cfg(feature = "mock")]
impl MockHealthService {
    pub fn with_get_status(mut self, status: HealthStatus) -> Self {
        self.expect_get_status().once().return_const(status);
        self
    }

    pub fn with_ping(mut self, timestamp: DateTime<Utc>) -> Self {
        self.expect_ping().once().return_const(timestamp);
        self
    }
}
