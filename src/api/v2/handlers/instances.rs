/*
 * Responsibility
 * - /v2/service_instances/{instance_id} : provision, deprovision, fetch, update
 * - Validate → call the broker → map the outcome onto 200/201/202
 * - Errors flow through ApiError; the session writes the response once
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
            GetInstanceResponse, OperationResponse, ProvisioningResponse, UpdateResponse,
        },
        extractors::QueryParams,
        validate,
    },
    domain::{DeprovisionDetails, ProvisionDetails, RequestContext, UpdateDetails},
    error::ApiError,
    logging::Session,
    response::Reply,
    state::AppState,
};

pub async fn provision(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    ctx: RequestContext,
    query: QueryParams,
    body: Bytes,
) -> Response {
    let session = state
        .logger
        .session("provision", &ctx)
        .with_instance(&instance_id);
    let async_allowed = query.flag("accepts_incomplete");

    let result =
        provision_instance(&state, ctx, &session, &instance_id, async_allowed, &body).await;
    session.finish(result)
}

async fn provision_instance(
    state: &AppState,
    ctx: RequestContext,
    session: &Session,
    instance_id: &str,
    async_allowed: bool,
    body: &[u8],
) -> Result<Reply, ApiError> {
    let details: ProvisionDetails = validate::decode_body(body)?;
    validate::require_ids(&details.service_id, &details.plan_id)?;

    let services = state
        .broker
        .services(&ctx)
        .instrument(session.span().clone())
        .await?;
    let (service, plan) =
        validate::resolve_catalog_entry(services, &details.service_id, &details.plan_id)?;
    validate::check_maintenance_info(details.maintenance_info.as_ref(), &plan)?;
    let ctx = ctx.with_catalog_entry(service, plan);

    let spec = state
        .broker
        .provision(&ctx, instance_id, details, async_allowed)
        .instrument(session.span().clone())
        .await?;

    let metadata = spec.metadata.non_empty();
    let reply = if spec.already_exists {
        Reply::json(
            StatusCode::OK,
            &ProvisioningResponse {
                dashboard_url: spec.dashboard_url,
                metadata,
                ..Default::default()
            },
        )
    } else if spec.is_async {
        Reply::json(
            StatusCode::ACCEPTED,
            &ProvisioningResponse {
                dashboard_url: spec.dashboard_url,
                operation_data: spec.operation_data,
                metadata,
            },
        )
    } else {
        Reply::json(
            StatusCode::CREATED,
            &ProvisioningResponse {
                dashboard_url: spec.dashboard_url,
                metadata,
                ..Default::default()
            },
        )
    };
    Ok(reply)
}

pub async fn deprovision(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    ctx: RequestContext,
    query: QueryParams,
) -> Response {
    let session = state
        .logger
        .session("deprovision", &ctx)
        .with_instance(&instance_id);

    let details = DeprovisionDetails {
        service_id: query.get("service_id"),
        plan_id: query.get("plan_id"),
        force: query.flag("force"),
    };
    let async_allowed = query.flag("accepts_incomplete");

    let result = async {
        validate::require_ids(&details.service_id, &details.plan_id)?;

        let spec = state
            .broker
            .deprovision(&ctx, &instance_id, details, async_allowed)
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

pub async fn get_instance(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    ctx: RequestContext,
) -> Response {
    let session = state
        .logger
        .session("getInstance", &ctx)
        .with_instance(&instance_id);

    let result = async {
        validate::require_fetch_version(
            &ctx,
            "get instance endpoint only supported starting with OSB version 2.14",
        )?;

        let spec = state
            .broker
            .get_instance(&ctx, &instance_id)
            .instrument(session.span().clone())
            .await?;

        Ok::<_, ApiError>(Reply::json(
            StatusCode::OK,
            &GetInstanceResponse {
                service_id: spec.service_id,
                plan_id: spec.plan_id,
                dashboard_url: spec.dashboard_url,
                parameters: spec.parameters,
                metadata: spec.metadata.non_empty(),
            },
        ))
    }
    .await;

    session.finish(result)
}

pub async fn update(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    ctx: RequestContext,
    query: QueryParams,
    body: Bytes,
) -> Response {
    let session = state
        .logger
        .session("update", &ctx)
        .with_instance(&instance_id);
    let async_allowed = query.flag("accepts_incomplete");

    let result = async {
        let details: UpdateDetails = validate::decode_body(&body)?;
        validate::require_service_id(&details.service_id)?;

        let spec = state
            .broker
            .update(&ctx, &instance_id, details, async_allowed)
            .instrument(session.span().clone())
            .await?;

        let status = if spec.is_async {
            StatusCode::ACCEPTED
        } else {
            StatusCode::OK
        };
        Ok::<_, ApiError>(Reply::json(
            status,
            &UpdateResponse {
                dashboard_url: spec.dashboard_url,
                operation_data: spec.operation_data,
            },
        ))
    }
    .await;

    session.finish(result)
}
