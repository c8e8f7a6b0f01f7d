use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn auth_routes(state: AppState) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/login", post(handlers::login))
        .route("/refresh", get(handlers::refresh))
        .route("/forgot-password", post(handlers::forgot_password));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/logout", post(handlers::logout))
        .route("/account", get(handlers::account))
        .route("/change-password", post(handlers::change_password))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
