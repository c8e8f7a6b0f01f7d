use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn schedule_routes(state: AppState) -> Router {
    // Public routes (no authentication required)
    // Same param name as the protected delete route, matchit requires it
    let public_routes = Router::new()
        .route("/{id}", get(handlers::list_available_schedules));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/", get(handlers::list_schedules_for_doctor))
        .route("/patient-accept", get(handlers::list_accepted_schedules))
        .route("/supporter", get(handlers::list_bookings_for_supporter))
        .route("/", post(handlers::create_schedule))
        .route("/", put(handlers::update_schedule))
        .route("/change-status", put(handlers::change_booking_status))
        .route("/{id}", delete(handlers::delete_schedule))
        .route("/{id}/{schedule_id}", delete(handlers::delete_booking))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
