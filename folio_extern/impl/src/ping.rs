use std::time::Duration;

use folio_extern_contracts::ping::PingApiService;
use tracing::trace;
use url::Url;

use crate::http::HttpClient;

/// Upper bound for a single ping. Kept well below the keep-alive interval so
/// a stalled request never delays the next one.
pub const PING_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct PingApiServiceImpl {
    http: HttpClient,
}

impl PingApiServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpClient::new(PING_TIMEOUT)?,
        })
    }
}

impl PingApiService for PingApiServiceImpl {
    async fn ping(&self, url: &Url) -> anyhow::Result<u16> {
        trace!(%url, "sending ping");
        let response = self.http.get(url.clone()).send().await?;
        Ok(response.status().as_u16())
    }
}
