//! Correlation id propagation.
//!
//! The first non-empty header among the accepted aliases wins; without one a
//! fresh UUID v4 is minted. The id lands in request extensions and is picked
//! up by the `RequestContext` extractor.

use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const CORRELATION_ID_HEADERS: [&str; 5] = [
    "X-Correlation-ID",
    "X-CorrelationID",
    "X-ForRequest-ID",
    "X-Request-ID",
    "X-Vcap-Request-Id",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn correlation_id_from(headers: &axum::http::HeaderMap) -> CorrelationId {
    CORRELATION_ID_HEADERS
        .iter()
        .find_map(|name| {
            headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .map(|id| CorrelationId(id.to_string()))
        .unwrap_or_else(|| CorrelationId(Uuid::new_v4().to_string()))
}

pub async fn correlation_id_middleware(mut req: Request, next: Next) -> Response {
    let id = correlation_id_from(req.headers());
    req.extensions_mut().insert(id);
    next.run(req).await
}
