use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;
use shared_models::response::SuccessResponse;

use crate::models::CreatePatientDto;
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(dto): Json<CreatePatientDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    let confirmation = PatientService::new(&state.db, &state.mailer).book(dto).await?;
    Ok(SuccessResponse::created(json!(confirmation), "Booking created"))
}
