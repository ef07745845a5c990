//! Cross-origin access for the portfolio frontends

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{from_fn, Next},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::routes::error;

/// Answer preflight requests and attach CORS headers for the given origins.
/// Requests carrying any other `Origin` are refused with `403 Forbidden`,
/// requests without one pass unchanged.
pub fn add<S: Clone + Send + Sync + 'static>(
    allowed_origins: Arc<[HeaderValue]>,
) -> impl FnOnce(Router<S>) -> Router<S> {
    move |router| {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed_origins.iter().cloned()))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true);

        router
            .layer(cors)
            .layer(from_fn(move |request: Request, next: Next| {
                let allowed_origins = Arc::clone(&allowed_origins);
                async move {
                    let rejected = request
                        .headers()
                        .get(header::ORIGIN)
                        .filter(|origin| !allowed_origins.contains(*origin))
                        .cloned();
                    if let Some(origin) = rejected {
                        warn!(?origin, "rejecting request from unknown origin");
                        return error(StatusCode::FORBIDDEN, "Origin not allowed");
                    }
                    next.run(request).await
                }
            }))
    }
}
