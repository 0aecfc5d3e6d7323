/*
 * Responsibility
 * - GET /v2/catalog
 * - Fetched from the broker on every call (catalogs may vary per request)
 */
use axum::{extract::State, http::StatusCode, response::Response};
use tracing::Instrument;

use crate::{
    api::v2::dto::responses::CatalogResponse, domain::RequestContext, error::ApiError,
    response::Reply, state::AppState,
};

pub async fn catalog(State(state): State<AppState>, ctx: RequestContext) -> Response {
    let session = state.logger.session("getCatalog", &ctx);

    let result = state
        .broker
        .services(&ctx)
        .instrument(session.span().clone())
        .await
        .map(|services| Reply::json(StatusCode::OK, &CatalogResponse { services }))
        .map_err(ApiError::from);

    session.finish(result)
}
