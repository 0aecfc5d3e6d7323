pub mod v2;

use axum::Router;

use crate::config::DEFAULT_BODY_LIMIT_BYTES;
use crate::middleware;
use crate::state::AppState;

/// Fully layered broker router, ready to serve or to nest into a larger app.
pub fn router(state: AppState) -> Router {
    router_with_body_limit(state, DEFAULT_BODY_LIMIT_BYTES)
}

pub fn router_with_body_limit(state: AppState, body_limit_bytes: usize) -> Router {
    let routes = middleware::apply_chain(v2::routes(), state.clone());
    middleware::http::apply(routes.with_state(state), body_limit_bytes)
}
