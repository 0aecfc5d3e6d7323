//! HTTP-level middleware (cross-cutting concerns).
//!
//! Responsibility:
//! - Access logging / request tracing (TraceLayer)
//! - Body size limits
//!
//! Notes:
//! - No timeout layer. A broker call may legitimately block for as long as the
//!   backing infrastructure takes; cancellation is the embedder's policy.

use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Apply HTTP-level middleware to the given Router.
pub fn apply(router: Router, body_limit_bytes: usize) -> Router {
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(body_limit_bytes));

    router.layer(layers)
}
