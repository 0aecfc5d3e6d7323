/*
 * Responsibility
 * - /v2/service_instances/{instance_id}/service_bindings/{binding_id}
 *   : bind, unbind, fetch
 * - Bind keeps two compatibility branches:
 *   - "instance does not exist" always answers 404 with a description
 *   - callers on 2.8/2.9 get the experimental volume-mount shape
 */
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

use crate::{
    api::v2::{
        dto::responses::{
            BindingResponse, ExperimentalVolumeMountBindingResponse, GetBindingResponse,
            OperationResponse,
        },
        extractors::QueryParams,
        validate,
    },
    domain::{BindDetails, MIN_FETCH_MINOR, RequestContext, UnbindDetails},
    error::{ApiError, BrokerError, ERR_INSTANCE_DOES_NOT_EXIST},
    logging::Session,
    response::Reply,
    state::AppState,
};

pub async fn bind(
    State(state): State<AppState>,
    Path((instance_id, binding_id)): Path<(String, String)>,
    ctx: RequestContext,
    query: QueryParams,
    body: Bytes,
) -> Response {
    let session = state
        .logger
        .session("bind", &ctx)
        .with_instance(&instance_id)
        .with_binding(&binding_id);

    let result = bind_instance(
        &state,
        &ctx,
        &session,
        &instance_id,
        &binding_id,
        &query,
        &body,
    )
    .await;
    session.finish(result)
}

async fn bind_instance(
    state: &AppState,
    ctx: &RequestContext,
    session: &Session,
    instance_id: &str,
    binding_id: &str,
    query: &QueryParams,
    body: &[u8],
) -> Result<Reply, ApiError> {
    let details: BindDetails = validate::decode_body(body)?;
    validate::require_ids(&details.service_id, &details.plan_id)?;

    // Async bind arrived in 2.14; older callers are always served synchronously.
    let version = ctx.api_version;
    let async_allowed = version.is_some_and(|v| v.at_least_minor(MIN_FETCH_MINOR))
        && query.flag("accepts_incomplete");

    let binding = state
        .broker
        .bind(ctx, instance_id, binding_id, details, async_allowed)
        .instrument(session.span().clone())
        .await
        .map_err(|err| match err {
            BrokerError::Failure(failure) if failure.is_kind_of(&ERR_INSTANCE_DOES_NOT_EXIST) => {
                ApiError::BindInstanceMissing(failure)
            }
            other => ApiError::Broker(other),
        })?;

    if binding.already_exists {
        return Ok(Reply::json(StatusCode::OK, &BindingResponse::from(binding)));
    }

    if binding.is_async {
        return Ok(Reply::json(
            StatusCode::ACCEPTED,
            &OperationResponse {
                operation_data: binding.operation_data,
            },
        ));
    }

    if version.is_some_and(|v| v.uses_experimental_volume_mounts()) {
        let legacy = ExperimentalVolumeMountBindingResponse::from_binding(binding)?;
        return Ok(Reply::json(StatusCode::CREATED, &legacy));
    }

    Ok(Reply::json(StatusCode::CREATED, &BindingResponse::from(binding)))
}

pub async fn unbind(
    State(state): State<AppState>,
    Path((instance_id, binding_id)): Path<(String, String)>,
    ctx: RequestContext,
    query: QueryParams,
) -> Response {
    let session = state
        .logger
        .session("unbind", &ctx)
        .with_instance(&instance_id)
        .with_binding(&binding_id);

    let details = UnbindDetails {
        service_id: query.get("service_id"),
        plan_id: query.get("plan_id"),
    };
    let async_allowed = query.flag("accepts_incomplete");

    let result = async {
        validate::require_ids(&details.service_id, &details.plan_id)?;

        let spec = state
            .broker
            .unbind(&ctx, &instance_id, &binding_id, details, async_allowed)
            .instrument(session.span().clone())
            .await?;

        if spec.is_async {
            return Ok(Reply::json(
                StatusCode::ACCEPTED,
                &OperationResponse {
                    operation_data: spec.operation_data,
                },
            ));
        }
        Ok::<_, ApiError>(Reply::empty(StatusCode::OK))
    }
    .await;

    session.finish(result)
}

pub async fn get_binding(
    State(state): State<AppState>,
    Path((instance_id, binding_id)): Path<(String, String)>,
    ctx: RequestContext,
) -> Response {
    let session = state
        .logger
        .session("getBinding", &ctx)
        .with_instance(&instance_id)
        .with_binding(&binding_id);

    let result = async {
        validate::require_fetch_version(
            &ctx,
            "get binding endpoint only supported starting with OSB version 2.14",
        )?;

        let spec = state
            .broker
            .get_binding(&ctx, &instance_id, &binding_id)
            .instrument(session.span().clone())
            .await?;

        Ok::<_, ApiError>(Reply::json(
            StatusCode::OK,
            &GetBindingResponse::from(spec),
        ))
    }
    .await;

    session.finish(result)
}
