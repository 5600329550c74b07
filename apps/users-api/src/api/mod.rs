//! API routes module
//!
//! Defines all HTTP API routes for the users API.

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes.
///
/// Routes are mounted at the router root: the external surface is fixed
/// (`/users`, `/user`), not namespaced.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(users::router(state))
        .merge(health::router(state.clone()))
}
