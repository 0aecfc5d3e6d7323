/*
 * Responsibility
 * - Error taxonomy shared by the gates, the validator and the dispatcher
 * - Translation of any failure into status + JSON body, logged under the
 *   request session before the response is written
 */
mod failure;

pub use failure::*;

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::domain::VersionError;
use crate::logging::Session;
use crate::response::Reply;

pub const UNKNOWN_ERROR_KEY: &str = "unknown-error";
pub const API_VERSION_INVALID_KEY: &str = "broker-api-version-invalid";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub description: String,
}

impl ErrorResponse {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            error: None,
            description: description.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct EmptyResponse {}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Described(ErrorResponse),
    Empty(EmptyResponse),
}

/// What a broker call can fail with.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Carries its own status, logger action and body shape.
    #[error(transparent)]
    Failure(#[from] FailureResponse),
    /// Anything else: always 500 with the error text as description.
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl BrokerError {
    pub fn unknown(msg: impl std::fmt::Display) -> Self {
        Self::Unknown(anyhow::anyhow!("{msg}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("service_id missing")]
    ServiceIdMissing,
    #[error("plan_id missing")]
    PlanIdMissing,
    #[error("service-id not in the catalog")]
    ServiceNotInCatalog,
    #[error("plan-id not in the catalog")]
    PlanNotInCatalog,
}

impl ValidationError {
    pub fn logger_action(self) -> &'static str {
        match self {
            Self::ServiceIdMissing => "service-id-missing",
            Self::PlanIdMissing => "plan-id-missing",
            Self::ServiceNotInCatalog => "invalid-service-id",
            Self::PlanNotInCatalog => "invalid-plan-id",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Version(#[from] VersionError),
    /// Endpoint needs a newer minor than the caller speaks.
    #[error("{0}")]
    VersionTooOld(&'static str),
    #[error("{0}")]
    UnprocessableBody(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Broker(#[from] BrokerError),
    /// Bind-time "instance does not exist": always 404 with a description,
    /// whatever status the failure was built with.
    #[error("{0}")]
    BindInstanceMissing(FailureResponse),
    #[error("encoding response: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl ApiError {
    /// Logs under the session and maps to the response to send.
    pub fn into_reply(self, session: &Session) -> Reply {
        let _entered = session.span().enter();

        match self {
            ApiError::Version(err) => {
                session.error(API_VERSION_INVALID_KEY, &err);
                Reply::json(
                    StatusCode::PRECONDITION_FAILED,
                    &ErrorResponse::described(err.to_string()),
                )
            }
            ApiError::VersionTooOld(message) => {
                session.error(API_VERSION_INVALID_KEY, &message);
                Reply::json(
                    StatusCode::PRECONDITION_FAILED,
                    &ErrorResponse::described(message),
                )
            }
            ApiError::UnprocessableBody(message) => {
                session.error("invalid-request-body", &message);
                Reply::json(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    &ErrorResponse::described(message),
                )
            }
            ApiError::Validation(err) => {
                session.error(err.logger_action(), &err);
                Reply::json(
                    StatusCode::BAD_REQUEST,
                    &ErrorResponse::described(err.to_string()),
                )
            }
            ApiError::Broker(BrokerError::Failure(failure)) => {
                session.error(failure.logger_action(), &failure);
                let status = failure.validated_status_code();
                Reply::json(status, &failure.error_response())
            }
            ApiError::Broker(BrokerError::Unknown(err)) => {
                session.error(UNKNOWN_ERROR_KEY, &err);
                Reply::json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ErrorResponse::described(err.to_string()),
                )
            }
            ApiError::BindInstanceMissing(failure) => {
                session.error(failure.logger_action(), &failure);
                Reply::json(
                    StatusCode::NOT_FOUND,
                    &ErrorResponse::described(failure.message()),
                )
            }
            ApiError::Encoding(err) => {
                session.error("encode-response", &err);
                Reply::json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ErrorResponse::described(err.to_string()),
                )
            }
        }
    }
}

impl From<FailureResponse> for ApiError {
    fn from(failure: FailureResponse) -> Self {
        ApiError::Broker(BrokerError::Failure(failure))
    }
}
