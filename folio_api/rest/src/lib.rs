use std::{net::IpAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use folio_core_contact_contracts::ContactService;
use folio_core_health_contracts::HealthService;
use folio_shared_contracts::time::TimeService;
use folio_utils::Apply;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact, Time> {
    health: Health,
    contact: Contact,
    time: Time,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    /// Deadline for reading a request, handling it and writing the response.
    pub request_timeout: Duration,
    /// Frontends allowed to call the API from a browser.
    pub allowed_origins: Arc<[HeaderValue]>,
}

impl RestServerConfig {
    pub fn new(request_timeout: Duration, allowed_origins: &[String]) -> anyhow::Result<Self> {
        let allowed_origins = allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid allowed origin {origin:?}"))
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Self {
            request_timeout,
            allowed_origins,
        })
    }
}

impl<Health, Contact, Time> RestServer<Health, Contact, Time>
where
    Health: HealthService,
    Contact: ContactService,
    Time: TimeService,
{
    pub fn new(health: Health, contact: Contact, time: Time, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            time,
            config,
        }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        info!("Server running on port {port}");
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let time = Arc::new(self.time);
        let routes = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into(), time));

        with_middlewares(routes, &self.config)
    }
}

/// The last layer added handles a request first.
fn with_middlewares(routes: Router<()>, config: &RestServerConfig) -> Router<()> {
    routes
        .fallback(routes::not_found)
        .apply(middlewares::panic_handler::add)
        .apply(middlewares::timeout::add(config.request_timeout))
        .apply(middlewares::cors::add(Arc::clone(&config.allowed_origins)))
        .apply(middlewares::trace::add)
        .apply(middlewares::request_id::add)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
        routing,
    };
    use chrono::{TimeZone, Utc};
    use folio_core_contact_contracts::MockContactService;
    use folio_core_health_contracts::MockHealthService;
    use folio_shared_contracts::time::MockTimeService;
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::middlewares::request_id::REQUEST_ID_HEADER;

    const ALLOWED: &str = "http://localhost:5173";

    fn config() -> RestServerConfig {
        RestServerConfig::new(
            Duration::from_secs(80),
            &[
                "https://jyot-vasava.vercel.app".into(),
                ALLOWED.into(),
                "http://localhost:3000".into(),
            ],
        )
        .unwrap()
    }

    fn server(
        health: MockHealthService,
        contact: MockContactService,
    ) -> RestServer<MockHealthService, MockContactService, MockTimeService> {
        RestServer::new(health, contact, MockTimeService::new(), config())
    }

    fn ping_service() -> MockHealthService {
        MockHealthService::new().with_ping(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
    }

    async fn json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn allowed_origin_gets_cors_headers() {
        let router = server(ping_service(), MockContactService::new()).router();

        let response = router
            .oneshot(
                Request::get("/api/ping")
                    .header(header::ORIGIN, ALLOWED)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ALLOWED);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn request_without_origin_is_allowed() {
        let router = server(ping_service(), MockContactService::new()).router();

        let response = router
            .oneshot(Request::get("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        assert_eq!(
            json(response).await,
            json!({"status": "alive", "timestamp": "2024-03-01T12:00:00.000Z"})
        );
    }

    #[tokio::test]
    async fn unknown_origin_is_forbidden() {
        let router = server(MockHealthService::new(), MockContactService::new()).router();

        let response = router
            .oneshot(
                Request::post("/api/send-email")
                    .header(header::ORIGIN, "https://evil.example")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        assert_eq!(json(response).await, json!({"error": "Origin not allowed"}));
    }

    #[tokio::test]
    async fn preflight() {
        let router = server(MockHealthService::new(), MockContactService::new()).router();

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/send-email")
                    .header(header::ORIGIN, ALLOWED)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ALLOWED);
        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
                .to_str()
                .unwrap()
                .to_lowercase(),
            "content-type"
        );
    }

    #[tokio::test]
    async fn unknown_route() {
        let router = server(MockHealthService::new(), MockContactService::new()).router();

        let response = router
            .oneshot(Request::get("/api/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn request_id_header() {
        let router = server(ping_service(), MockContactService::new()).router();

        let response = router
            .oneshot(Request::get("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let request_id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert_eq!(request_id.len(), 32);
    }

    #[tokio::test]
    async fn panicking_handler() {
        let routes = Router::new().route(
            "/boom",
            routing::get(|| async {
                if true {
                    panic!("boom");
                }
            }),
        );
        let router = with_middlewares(routes, &config());

        let response = router
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(
            json(response).await,
            json!({"error": "Internal server error"})
        );
    }

    fn slow_routes(delay: Duration) -> Router<()> {
        Router::new().route(
            "/slow",
            routing::get(move || async move {
                tokio::time::sleep(delay).await;
                "done"
            }),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn handler_exceeding_timeout() {
        let router = with_middlewares(slow_routes(Duration::from_secs(120)), &config());

        let response = router
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(json(response).await, json!({"error": "Request timed out"}));
    }

    #[tokio::test(start_paused = true)]
    async fn handler_within_timeout() {
        let router = with_middlewares(slow_routes(Duration::from_secs(79)), &config());

        let response = router
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"done");
    }

    #[test]
    fn invalid_origin() {
        let result = RestServerConfig::new(Duration::from_secs(1), &["bad\norigin".into()]);
        assert!(result.is_err());
    }
}
