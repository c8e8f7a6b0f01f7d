use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;
use shared_utils::upload::UPLOAD_BODY_LIMIT;

use crate::handlers;

pub fn clinic_routes(state: AppState) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new().route("/", get(handlers::list_clinics));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/", post(handlers::create_clinic))
        .route("/{id}", put(handlers::update_clinic))
        .route("/{id}", delete(handlers::delete_clinic))
        .route(
            "/image",
            post(handlers::upload_clinic_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
