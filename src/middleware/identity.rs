/*
 * Responsibility
 * - Copy the caller-identity headers into request extensions
 *   - X-Broker-API-Originating-Identity (raw, decoded lazily by RequestContext)
 *   - X-Api-Info-Location
 *   - X-Broker-API-Request-Identity (echoed on every response)
 * - Never rejects
 */
use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

pub const ORIGINATING_IDENTITY_HEADER: &str = "X-Broker-API-Originating-Identity";
pub const INFO_LOCATION_HEADER: &str = "X-Api-Info-Location";
pub const REQUEST_IDENTITY_HEADER: &str = "X-Broker-API-Request-Identity";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginatingIdentityHeader(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoLocation(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity(pub String);

pub fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub async fn originating_identity_middleware(mut req: Request, next: Next) -> Response {
    if let Some(v) = header_value(req.headers(), ORIGINATING_IDENTITY_HEADER) {
        req.extensions_mut().insert(OriginatingIdentityHeader(v));
    }
    next.run(req).await
}

pub async fn info_location_middleware(mut req: Request, next: Next) -> Response {
    if let Some(v) = header_value(req.headers(), INFO_LOCATION_HEADER) {
        req.extensions_mut().insert(InfoLocation(v));
    }
    next.run(req).await
}

pub async fn request_identity_middleware(mut req: Request, next: Next) -> Response {
    if let Some(v) = header_value(req.headers(), REQUEST_IDENTITY_HEADER) {
        req.extensions_mut().insert(RequestIdentity(v));
    }
    next.run(req).await
}
