/*
 * Responsibility
 * - v2 URL structure; the method/route pairing is part of the protocol
 */
use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use crate::api::v2::handlers::{
    bindings::{bind, get_binding, unbind},
    catalog::catalog,
    instances::{deprovision, get_instance, provision, update},
    last_operation::{last_binding_operation, last_operation},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v2/catalog", get(catalog))
        .route(
            "/v2/service_instances/{instance_id}",
            put(provision)
                .get(get_instance)
                .patch(update)
                .delete(deprovision),
        )
        .route(
            "/v2/service_instances/{instance_id}/last_operation",
            get(last_operation),
        )
        .route(
            "/v2/service_instances/{instance_id}/service_bindings/{binding_id}",
            put(bind).get(get_binding).delete(unbind),
        )
        .route(
            "/v2/service_instances/{instance_id}/service_bindings/{binding_id}/last_operation",
            get(last_binding_operation),
        )
}
