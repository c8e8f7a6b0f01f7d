use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn doctor_routes(state: AppState) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/spec/{id}", get(handlers::list_doctors_by_specialization))
        .route("/clinic/{id}", get(handlers::list_doctors_by_clinic))
        .route("/{id}", get(handlers::get_doctor));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/bill", put(handlers::send_bill))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
