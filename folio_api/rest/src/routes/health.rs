use std::sync::Arc;

use axum::{extract::State, routing, Json, Router};
use folio_core_health_contracts::{HealthService, HealthStatus};
use folio_shared_contracts::time::format_timestamp;
use serde::Serialize;

pub fn router(service: Arc<impl HealthService>) -> Router<()> {
    Router::new()
        .route("/", routing::get(status))
        .route("/api/ping", routing::get(ping))
        .with_state(service)
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    timestamp: String,
    /// Seconds since the process started.
    uptime: f64,
}

#[derive(Serialize)]
struct PingResponse {
    status: &'static str,
    timestamp: String,
}

async fn status(service: State<Arc<impl HealthService>>) -> Json<StatusResponse> {
    let HealthStatus { timestamp, uptime } = service.get_status();

    Json(StatusResponse {
        status: "Server is running",
        timestamp: format_timestamp(timestamp),
        uptime: uptime.as_secs_f64(),
    })
}

async fn ping(service: State<Arc<impl HealthService>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "alive",
        timestamp: format_timestamp(service.ping()),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use folio_core_health_contracts::MockHealthService;
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    async fn get(service: MockHealthService, uri: &str) -> (StatusCode, Value) {
        let response = router(service.into())
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn server_status() {
        let service = MockHealthService::new().with_get_status(HealthStatus {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            uptime: Duration::from_millis(90_500),
        });

        let (status, body) = get(service, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "status": "Server is running",
                "timestamp": "2024-03-01T12:00:00.000Z",
                "uptime": 90.5,
            })
        );
    }

    #[tokio::test]
    async fn ping_alive() {
        let service =
            MockHealthService::new().with_ping(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 5).unwrap());

        let (status, body) = get(service, "/api/ping").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "alive", "timestamp": "2024-03-01T12:00:05.000Z"})
        );
    }
}
