use chrono::{DateTime, SecondsFormat, Utc};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(mut self, time: DateTime<Utc>) -> Self {
        self.expect_now().once().return_const(time);
        self
    }
}

/// Formats a timestamp the way it appears in API responses and log lines,
/// e.g. `2026-10-14T12:00:00.000Z`.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamp_format() {
        let time = Utc.with_ymd_and_hms(2026, 10, 14, 12, 30, 5).unwrap();
        assert_eq!(format_timestamp(time), "2026-10-14T12:30:05.000Z");
    }
}
