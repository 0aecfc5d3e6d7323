/*
 * Responsibility
 * - Assemble RequestContext from what the middleware chain left in extensions
 * - Read query-string parameters the way platforms send them
 *   (absent == empty, flags are true only for the literal "true")
 */
use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query, rejection::QueryRejection},
    http::request::Parts,
};
use uuid::Uuid;

use crate::domain::{ApiVersion, RequestContext};
use crate::middleware::correlation::CorrelationId;
use crate::middleware::identity::{InfoLocation, OriginatingIdentityHeader, RequestIdentity};

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ext = &parts.extensions;
        Ok(RequestContext {
            correlation_id: ext
                .get::<CorrelationId>()
                .map(|c| c.0.clone())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            request_identity: ext.get::<RequestIdentity>().map(|r| r.0.clone()),
            originating_identity: ext.get::<OriginatingIdentityHeader>().map(|o| o.0.clone()),
            info_location: ext.get::<InfoLocation>().map(|i| i.0.clone()),
            api_version: ext.get::<ApiVersion>().copied(),
            service: None,
            plan: None,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    pub fn get(&self, key: &str) -> String {
        self.0.get(key).cloned().unwrap_or_default()
    }

    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| v == "true")
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)?;
        Ok(Self(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn parse(uri: &str) -> QueryParams {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        QueryParams::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reads_values_and_flags() {
        let q = parse("/x?service_id=svc&plan_id=p%201&accepts_incomplete=true").await;
        assert_eq!(q.get("service_id"), "svc");
        assert_eq!(q.get("plan_id"), "p 1");
        assert!(q.flag("accepts_incomplete"));
        assert!(!q.flag("force"));
        assert_eq!(q.get("operation"), "");
    }

    #[tokio::test]
    async fn only_literal_true_is_a_flag() {
        let q = parse("/x?force=1&accepts_incomplete=TRUE").await;
        assert!(!q.flag("force"));
        assert!(!q.flag("accepts_incomplete"));
    }

    #[tokio::test]
    async fn opaque_token_survives_decoding() {
        let q = parse("/x?operation=%7B%22step%22%3A2%7D").await;
        assert_eq!(q.get("operation"), r#"{"step":2}"#);
    }

    #[tokio::test]
    async fn missing_query_is_empty() {
        let q = parse("/x").await;
        assert_eq!(q.get("service_id"), "");
    }

    #[tokio::test]
    async fn context_defaults_correlation_id() {
        let (mut parts, _) = Request::builder().uri("/x").body(()).unwrap().into_parts();
        let ctx = RequestContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(Uuid::parse_str(&ctx.correlation_id).is_ok());
        assert!(ctx.api_version.is_none());
    }
}
