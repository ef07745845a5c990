use chrono::{DateTime, Utc};
use folio_core_health_contracts::{HealthService, HealthStatus};
use folio_shared_contracts::time::TimeService;

#[derive(Debug, Clone)]
pub struct HealthServiceImpl<Time> {
    time: Time,
    started_at: DateTime<Utc>,
}

impl<Time: TimeService> HealthServiceImpl<Time> {
    /// Uptime is measured from the moment this service is created.
    pub fn new(time: Time) -> Self {
        let started_at = time.now();
        Self { time, started_at }
    }
}

impl<Time: TimeService> HealthService for HealthServiceImpl<Time> {
    fn get_status(&self) -> HealthStatus {
        let timestamp = self.time.now();
        let uptime = (timestamp - self.started_at).to_std().unwrap_or_default();
        HealthStatus { timestamp, uptime }
    }

    fn ping(&self) -> DateTime<Utc> {
        self.time.now()
    }
}
