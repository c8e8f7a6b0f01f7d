use axum::{middleware, routing::get, Router};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn admin_routes(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/dashboard", get(handlers::dashboard))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}
