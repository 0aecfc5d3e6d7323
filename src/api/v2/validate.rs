//! Request validation shared by the operation handlers.
//!
//! Order matters: body decode (422) before id presence (400) before catalog
//! resolution (400) before the maintenance_info check (422).

use serde::de::DeserializeOwned;

use crate::domain::{MIN_FETCH_MINOR, MaintenanceInfo, RequestContext, Service, ServicePlan};
use crate::error::{
    ApiError, ERR_MAINTENANCE_INFO_CONFLICT, ERR_MAINTENANCE_INFO_NIL_CONFLICT, FailureResponse,
    ValidationError,
};

pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::UnprocessableBody(e.to_string()))
}

pub fn require_service_id(service_id: &str) -> Result<(), ValidationError> {
    if service_id.is_empty() {
        return Err(ValidationError::ServiceIdMissing);
    }
    Ok(())
}

pub fn require_ids(service_id: &str, plan_id: &str) -> Result<(), ValidationError> {
    require_service_id(service_id)?;
    if plan_id.is_empty() {
        return Err(ValidationError::PlanIdMissing);
    }
    Ok(())
}

/// Endpoints introduced in 2.14 answer 412 to older callers.
pub fn require_fetch_version(ctx: &RequestContext, message: &'static str) -> Result<(), ApiError> {
    match ctx.api_version {
        Some(version) if version.at_least_minor(MIN_FETCH_MINOR) => Ok(()),
        _ => Err(ApiError::VersionTooOld(message)),
    }
}

/// Finds the service, then the plan within it.
pub fn resolve_catalog_entry(
    services: Vec<Service>,
    service_id: &str,
    plan_id: &str,
) -> Result<(Service, ServicePlan), ValidationError> {
    let service = services
        .into_iter()
        .find(|s| s.id == service_id)
        .ok_or(ValidationError::ServiceNotInCatalog)?;
    let plan = service
        .plan(plan_id)
        .cloned()
        .ok_or(ValidationError::PlanNotInCatalog)?;
    Ok((service, plan))
}

/// A requested `maintenance_info` must name the version the plan advertises.
pub fn check_maintenance_info(
    requested: Option<&MaintenanceInfo>,
    plan: &ServicePlan,
) -> Result<(), FailureResponse> {
    let Some(requested) = requested else {
        return Ok(());
    };
    match &plan.maintenance_info {
        None => Err(ERR_MAINTENANCE_INFO_NIL_CONFLICT),
        Some(advertised) if advertised.version != requested.version => {
            Err(ERR_MAINTENANCE_INFO_CONFLICT)
        }
        Some(_) => Ok(()),
    }
}
