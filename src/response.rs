//! Response builder.
//!
//! Every handler outcome, success or failure, ends up as a `Reply` and is
//! written exactly once through `Session::finish`, which adds the JSON content
//! type and echoes the caller's request identity.

use axum::{
    Json,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::logging::Session;

pub const REQUEST_IDENTITY_HEADER: &str = "x-broker-api-request-identity";

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    status: StatusCode,
    body: Value,
}

impl Reply {
    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(err) => {
                tracing::error!(action = "encoding-response", error = %err);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: json!({"description": err.to_string()}),
                }
            }
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: json!({}),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_response_with_identity(self, request_identity: Option<&str>) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        if let Some(value) = request_identity.and_then(|v| HeaderValue::from_str(v).ok()) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_IDENTITY_HEADER), value);
        }
        response
    }
}

impl Session {
    /// Writes the outcome of an operation, translating errors on the way.
    pub fn finish(&self, result: Result<Reply, ApiError>) -> Response {
        let reply = result.unwrap_or_else(|err| err.into_reply(self));
        reply.into_response_with_identity(self.request_identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn echoes_request_identity() {
        let response = Reply::empty(StatusCode::OK).into_response_with_identity(Some("abc"));
        assert_eq!(response.headers()[REQUEST_IDENTITY_HEADER], "abc");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn no_identity_no_header() {
        let response = Reply::empty(StatusCode::OK).into_response_with_identity(None);
        assert!(response.headers().get(REQUEST_IDENTITY_HEADER).is_none());
    }
}
