//! `X-Broker-API-Version` gate.
//!
//! Rejects with 412 when the header is absent, malformed or not `2.x`, and
//! otherwise hands the parsed `ApiVersion` to the handlers. It runs before
//! the request identity is attached, so it re-reads that header itself for
//! the echo and logs the correlation id left by the outer middleware.
//! Minimum-minor checks belong to the endpoints that need them.

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};

use crate::domain::{ApiVersion, VERSION_HEADER, VersionError};
use crate::error::ApiError;
use crate::middleware::correlation::CorrelationId;
use crate::middleware::identity::{REQUEST_IDENTITY_HEADER, header_value};
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, api_version_middleware))
}

async fn api_version_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let parsed = match req.headers().get(VERSION_HEADER) {
        Some(v) => v
            .to_str()
            .map_err(|_| VersionError::Malformed)
            .and_then(|raw| ApiVersion::from_header(Some(raw))),
        None => ApiVersion::from_header(None),
    };

    match parsed {
        Ok(version) => {
            req.extensions_mut().insert(version);
            next.run(req).await
        }
        Err(err) => {
            let request_identity = header_value(req.headers(), REQUEST_IDENTITY_HEADER);
            let correlation_id = req.extensions().get::<CorrelationId>();
            let session = state.logger.bare_session(
                "version-header-check",
                correlation_id.map(CorrelationId::as_str),
                request_identity,
            );
            session.finish(Err(ApiError::Version(err)))
        }
    }
}
