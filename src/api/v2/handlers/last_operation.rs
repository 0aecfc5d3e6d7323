/*
 * Responsibility
 * - Polling endpoints for async instance/binding operations
 * - The `operation` query value is handed to the broker untouched
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

use crate::{
    api::v2::{dto::responses::LastOperationResponse, extractors::QueryParams, validate},
    domain::{PollDetails, RequestContext},
    error::ApiError,
    response::Reply,
    state::AppState,
};

fn poll_details(query: &QueryParams) -> PollDetails {
    PollDetails {
        service_id: query.get("service_id"),
        plan_id: query.get("plan_id"),
        operation_data: query.get("operation"),
    }
}

pub async fn last_operation(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    ctx: RequestContext,
    query: QueryParams,
) -> Response {
    let session = state
        .logger
        .session("lastOperation", &ctx)
        .with_instance(&instance_id);
    let details = poll_details(&query);

    session.info("starting-check-for-operation");

    let result = async {
        let op = state
            .broker
            .last_operation(&ctx, &instance_id, details)
            .instrument(session.span().clone())
            .await?;

        tracing::info!(
            parent: session.span(),
            action = %session.action("done-check-for-operation"),
            state = %op.state,
        );
        Ok::<_, ApiError>(Reply::json(StatusCode::OK, &LastOperationResponse::from(op)))
    }
    .await;

    session.finish(result)
}

pub async fn last_binding_operation(
    State(state): State<AppState>,
    Path((instance_id, binding_id)): Path<(String, String)>,
    ctx: RequestContext,
    query: QueryParams,
) -> Response {
    let session = state
        .logger
        .session("lastBindingOperation", &ctx)
        .with_instance(&instance_id)
        .with_binding(&binding_id);
    let details = poll_details(&query);

    let result = async {
        validate::require_fetch_version(
            &ctx,
            "last binding operation endpoint only supported starting with OSB version 2.14",
        )?;

        session.info("starting-check-for-binding-operation");
        let op = state
            .broker
            .last_binding_operation(&ctx, &instance_id, &binding_id, details)
            .instrument(session.span().clone())
            .await?;

        tracing::info!(
            parent: session.span(),
            action = %session.action("done-check-for-binding-operation"),
            state = %op.state,
        );
        Ok::<_, ApiError>(Reply::json(StatusCode::OK, &LastOperationResponse::from(op)))
    }
    .await;

    session.finish(result)
}
