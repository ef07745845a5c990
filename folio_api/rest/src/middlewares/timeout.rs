use std::time::Duration;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use tower_http::timeout::{RequestBodyTimeoutLayer, ResponseBodyTimeoutLayer, TimeoutLayer};

use crate::routes::error;

/// Bound the time spent on one request. A handler that does not finish in
/// time is answered with `408 Request Timeout`, a stalled body is aborted.
pub fn add<S: Clone + Send + Sync + 'static>(
    timeout: Duration,
) -> impl FnOnce(Router<S>) -> Router<S> {
    move |router| {
        router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                timeout,
            ))
            .layer(from_fn(timed_out))
            .layer(RequestBodyTimeoutLayer::new(timeout))
            .layer(ResponseBodyTimeoutLayer::new(timeout))
    }
}

/// The timeout layer answers with an empty body, give it the usual error shape.
async fn timed_out(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        return error(StatusCode::REQUEST_TIMEOUT, "Request timed out");
    }
    response
}
