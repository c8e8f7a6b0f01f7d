use axum::{routing::get, Json, Router};
use serde_json::json;
use tower_http::services::ServeDir;

use admin_cell::router::admin_routes;
use auth_cell::router::auth_routes;
use clinic_cell::router::clinic_routes;
use doctor_cell::router::doctor_routes;
use patient_cell::router::patient_routes;
use schedule_cell::router::schedule_routes;
use shared_database::AppState;
use specialty_cell::router::specialty_routes;
use user_cell::router::user_routes;

pub fn create_router(state: AppState) -> Router {
    let images = ServeDir::new(state.config.upload_dir.clone());

    let api = Router::new()
        .nest("/auth", auth_routes(state.clone()))
        .nest("/clinic", clinic_routes(state.clone()))
        .nest("/specialty", specialty_routes(state.clone()))
        .nest("/doctor", doctor_routes(state.clone()))
        .nest("/schedules", schedule_routes(state.clone()))
        .nest("/patient", patient_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/admin", admin_routes(state));

    Router::new()
        .route(
            "/health-check",
            get(|| async { Json(json!({ "status": "ok" })) }),
        )
        .nest("/api/v1", api)
        .nest_service("/images", images)
}
