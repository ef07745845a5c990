use std::future::Future;

use url::Url;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait PingApiService: Send + Sync + 'static {
    /// Send a GET request to `url` and return the status code of the
    /// response, whatever it is. Only transport failures are errors.
    fn ping(&self, url: &Url) -> impl Future<Output = anyhow::Result<u16>> + Send;
}

#[cfg(feature = "mock")]
impl MockPingApiService {
    pub fn with_ping(mut self, url: Url, result: anyhow::Result<u16>) -> Self {
        self.expect_ping()
            .once()
            .with(mockall::predicate::eq(url))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
