use std::{future::Future, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::form::ContactFormFields;

pub const SEND_EMAIL_PATH: &str = "api/send-email";

#[cfg_attr(test, mockall::automock)]
pub trait ContactApi: Send + Sync + 'static {
    /// Submit the form fields to the contact backend.
    ///
    /// Returns `Err` only if no response was received.
    fn send_message(
        &self,
        fields: &ContactFormFields,
    ) -> impl Future<Output = anyhow::Result<ContactApiResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactApiResponse {
    Accepted,
    /// The backend answered with a non-success status. `error` is the message
    /// of its error body, if there was a usable one.
    Rejected { error: Option<String> },
}

#[derive(Debug, Clone)]
pub struct HttpContactApi {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpContactApi {
    /// `base` is the root of the contact backend, e.g.
    /// `https://my-portfolio-email-service.onrender.com/`.
    pub fn new(base: &Url, timeout: Duration) -> anyhow::Result<Self> {
        let endpoint = base
            .join(SEND_EMAIL_PATH)
            .with_context(|| format!("Invalid contact backend url {base}"))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build http client")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ContactApi for HttpContactApi {
    async fn send_message(&self, fields: &ContactFormFields) -> anyhow::Result<ContactApiResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(fields)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(ContactApiResponse::Accepted);
        }

        let error = response
            .json::<ErrorBody>()
            .await
            .inspect_err(|err| debug!(%status, "unreadable error body: {err}"))
            .ok()
            .and_then(|body| body.error)
            .filter(|error| !error.is_empty());

        Ok(ContactApiResponse::Rejected { error })
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing, Json, Router};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use super::*;

    async fn serve(router: Router) -> Url {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}/").parse().unwrap()
    }

    fn fields() -> ContactFormFields {
        ContactFormFields {
            name: "A".into(),
            email: "a@b.com".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
        }
    }

    fn sut(base: &Url) -> HttpContactApi {
        HttpContactApi::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint() {
        let base = "https://my-portfolio-email-service.onrender.com"
            .parse()
            .unwrap();
        assert_eq!(
            sut(&base).endpoint().as_str(),
            "https://my-portfolio-email-service.onrender.com/api/send-email"
        );
    }

    #[tokio::test]
    async fn accepted() {
        let base = serve(Router::new().route(
            "/api/send-email",
            routing::post(|Json(body): Json<Value>| async move {
                assert_eq!(
                    body,
                    json!({"name": "A", "email": "a@b.com", "subject": "Hi", "message": "Hello"})
                );
                Json(json!({"message": "Email sent successfully"}))
            }),
        ))
        .await;

        let result = sut(&base).send_message(&fields()).await.unwrap();

        assert_eq!(result, ContactApiResponse::Accepted);
    }

    #[tokio::test]
    async fn rejected_with_message() {
        let base = serve(Router::new().route(
            "/api/send-email",
            routing::post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Invalid email format"})),
                )
            }),
        ))
        .await;

        let result = sut(&base).send_message(&fields()).await.unwrap();

        assert_eq!(
            result,
            ContactApiResponse::Rejected {
                error: Some("Invalid email format".into())
            }
        );
    }

    #[tokio::test]
    async fn rejected_without_message() {
        let base = serve(Router::new().route(
            "/api/send-email",
            routing::post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        ))
        .await;

        let result = sut(&base).send_message(&fields()).await.unwrap();

        assert_eq!(result, ContactApiResponse::Rejected { error: None });
    }

    #[tokio::test]
    async fn connection_refused() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let base = format!("http://{addr}/").parse().unwrap();

        let result = sut(&base).send_message(&fields()).await;

        assert!(result.is_err());
    }
}
