/*
 * Responsibility
 * - Compose the broker middleware chain around the routes
 * - Execution order (outermost first):
 *   correlation id -> basic auth -> originating identity -> version gate
 *   -> info location -> request identity -> handler
 */
pub mod api_version;
pub mod auth;
pub mod correlation;
pub mod http;
pub mod identity;

use axum::{Router, middleware::from_fn};

use crate::state::AppState;

/// Layers apply inside-out: the last `.layer` call runs first.
pub fn apply_chain(router: Router<AppState>, state: AppState) -> Router<AppState> {
    let router = router
        .layer(from_fn(identity::request_identity_middleware))
        .layer(from_fn(identity::info_location_middleware));
    let router = api_version::apply(router, state.clone());
    let router = router.layer(from_fn(identity::originating_identity_middleware));
    let router = auth::basic::apply(router, state);
    router.layer(from_fn(correlation::correlation_id_middleware))
}
