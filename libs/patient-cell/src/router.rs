use axum::{routing::post, Router};

use shared_database::AppState;

use crate::handlers;

/// Booking creation is reachable without a token, patients do not have
/// accounts.
pub fn patient_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::create_booking))
        .with_state(state)
}
