//! Structured broker failures.
//!
//! A `FailureResponse` carries the HTTP status, the logging action and an
//! optional machine-readable key chosen by the broker at the point of failure.
//! Values are immutable once built: `append_error_message` returns a new one.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use thiserror::Error;

use super::{EmptyResponse, ErrorBody, ErrorResponse};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FailureResponse {
    message: Cow<'static, str>,
    status: u16,
    logger_action: Cow<'static, str>,
    error_key: Option<Cow<'static, str>>,
    empty_response: bool,
}

impl FailureResponse {
    /// Failure whose body is `{"description": <err>}`.
    pub fn new(
        err: impl fmt::Display,
        status: u16,
        logger_action: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::builder(err, status, logger_action).build()
    }

    pub fn builder(
        err: impl fmt::Display,
        status: u16,
        logger_action: impl Into<Cow<'static, str>>,
    ) -> FailureResponseBuilder {
        FailureResponseBuilder {
            inner: Self {
                message: Cow::Owned(err.to_string()),
                status,
                logger_action: logger_action.into(),
                error_key: None,
                empty_response: false,
            },
        }
    }

    const fn predefined(
        message: &'static str,
        status: u16,
        logger_action: &'static str,
        error_key: Option<&'static str>,
        empty_response: bool,
    ) -> Self {
        Self {
            message: Cow::Borrowed(message),
            status,
            logger_action: Cow::Borrowed(logger_action),
            error_key: match error_key {
                Some(key) => Some(Cow::Borrowed(key)),
                None => None,
            },
            empty_response,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status as constructed, before validation.
    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn logger_action(&self) -> &str {
        &self.logger_action
    }

    pub fn error_key(&self) -> Option<&str> {
        self.error_key.as_deref()
    }

    pub fn is_empty_response(&self) -> bool {
        self.empty_response
    }

    /// Same failure kind as `other`: message and logger action match.
    /// Status and body shape are ignored.
    pub fn is_kind_of(&self, other: &FailureResponse) -> bool {
        self.message == other.message && self.logger_action == other.logger_action
    }

    /// Status to send. Anything outside 4xx/5xx is a broker bug and becomes 500.
    pub fn validated_status_code(&self) -> StatusCode {
        match StatusCode::from_u16(self.status) {
            Ok(status) if (400..600).contains(&self.status) => status,
            _ => {
                tracing::warn!(
                    action = "validating-status-code",
                    status = self.status,
                    "invalid failure http response code: {}, expected 4xx or 5xx, returning internal server error: 500",
                    self.status
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_response(&self) -> ErrorBody {
        if self.empty_response {
            return ErrorBody::Empty(EmptyResponse {});
        }
        ErrorBody::Described(ErrorResponse {
            error: self.error_key.as_deref().map(str::to_string),
            description: self.message.to_string(),
        })
    }

    pub fn append_error_message(&self, msg: &str) -> Self {
        Self {
            message: Cow::Owned(format!("{} {}", self.message, msg)),
            ..self.clone()
        }
    }
}

pub struct FailureResponseBuilder {
    inner: FailureResponse,
}

impl FailureResponseBuilder {
    pub fn with_error_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.inner.error_key = Some(key.into());
        self
    }

    pub fn with_empty_response(mut self) -> Self {
        self.inner.empty_response = true;
        self
    }

    pub fn build(self) -> FailureResponse {
        self.inner
    }
}

pub const ERR_INSTANCE_ALREADY_EXISTS: FailureResponse = FailureResponse::predefined(
    "instance already exists",
    409,
    "instance-already-exists",
    None,
    true,
);

pub const ERR_INSTANCE_DOES_NOT_EXIST: FailureResponse = FailureResponse::predefined(
    "instance does not exist",
    410,
    "instance-missing",
    None,
    true,
);

pub const ERR_INSTANCE_LIMIT_MET: FailureResponse = FailureResponse::predefined(
    "instance limit for this service has been reached",
    500,
    "instance-limit-reached",
    None,
    false,
);

pub const ERR_BINDING_ALREADY_EXISTS: FailureResponse = FailureResponse::predefined(
    "binding already exists",
    409,
    "binding-already-exists",
    None,
    false,
);

pub const ERR_BINDING_DOES_NOT_EXIST: FailureResponse = FailureResponse::predefined(
    "binding does not exist",
    410,
    "binding-missing",
    None,
    true,
);

pub const ERR_BINDING_NOT_FOUND: FailureResponse = FailureResponse::predefined(
    "binding cannot be fetched",
    404,
    "binding-not-found",
    None,
    true,
);

pub const ERR_ASYNC_REQUIRED: FailureResponse = FailureResponse::predefined(
    "This service plan requires client support for asynchronous service operations.",
    422,
    "async-required",
    Some("AsyncRequired"),
    false,
);

pub const ERR_PLAN_CHANGE_NOT_SUPPORTED: FailureResponse = FailureResponse::predefined(
    "The requested plan migration cannot be performed",
    422,
    "plan-change-not-supported",
    Some("PlanChangeNotSupported"),
    false,
);

pub const ERR_RAW_PARAMS_INVALID: FailureResponse = FailureResponse::predefined(
    "The format of the parameters is not valid JSON",
    422,
    "invalid-raw-params",
    None,
    false,
);

pub const ERR_APP_GUID_NOT_PROVIDED: FailureResponse = FailureResponse::predefined(
    "app_guid is a required field but was not provided",
    422,
    "app-guid-not-provided",
    None,
    false,
);

pub const ERR_PLAN_QUOTA_EXCEEDED: FailureResponse = FailureResponse::predefined(
    "The quota for this service plan has been exceeded. Please contact your Operator for help.",
    500,
    "plan-quota-exceeded",
    None,
    false,
);

pub const ERR_SERVICE_QUOTA_EXCEEDED: FailureResponse = FailureResponse::predefined(
    "The quota for this service has been exceeded. Please contact your Operator for help.",
    500,
    "service-quota-exceeded",
    None,
    false,
);

pub const ERR_CONCURRENT_INSTANCE_ACCESS: FailureResponse = FailureResponse::predefined(
    "instance is being updated and cannot be retrieved",
    422,
    "get-instance-during-update",
    Some("ConcurrencyError"),
    false,
);

pub const ERR_MAINTENANCE_INFO_CONFLICT: FailureResponse = FailureResponse::predefined(
    "passed maintenance_info does not match the catalog maintenance_info",
    422,
    "maintenance-info-conflict",
    Some("MaintenanceInfoConflict"),
    false,
);

pub const ERR_MAINTENANCE_INFO_NIL_CONFLICT: FailureResponse = FailureResponse::predefined(
    "maintenance_info was passed, but the broker catalog contains no maintenance_info",
    422,
    "maintenance-info-conflict",
    Some("MaintenanceInfoConflict"),
    false,
);
