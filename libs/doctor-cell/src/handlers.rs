use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_database::AppState;
use shared_models::auth::CurrentUser;
use shared_models::error::AppError;
use shared_models::response::SuccessResponse;

use crate::models::CreateBillDto;
use crate::services::{BillService, DoctorService};

pub async fn list_doctors(
    State(state): State<AppState>,
) -> Result<SuccessResponse<Value>, AppError> {
    let doctors = DoctorService::new(&state.db).list_all().await?;
    Ok(SuccessResponse::new(json!(doctors), "Doctors fetched"))
}

pub async fn list_doctors_by_specialization(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<SuccessResponse<Value>, AppError> {
    let doctors = DoctorService::new(&state.db).list_by_specialization(id).await?;
    Ok(SuccessResponse::new(json!(doctors), "Doctors fetched"))
}

pub async fn list_doctors_by_clinic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<SuccessResponse<Value>, AppError> {
    let doctors = DoctorService::new(&state.db).list_by_clinic(id).await?;
    Ok(SuccessResponse::new(json!(doctors), "Doctors fetched"))
}

pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<SuccessResponse<Value>, AppError> {
    let doctor = DoctorService::new(&state.db).get(id).await?;
    Ok(SuccessResponse::new(json!(doctor), "Doctor fetched"))
}

pub async fn send_bill(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(dto): Json<CreateBillDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    if !user.is_doctor() {
        return Err(AppError::Forbidden("Only doctors can issue bills".to_string()));
    }

    BillService::new(&state.db, &state.mailer)
        .send_bill(user.id, dto)
        .await?;

    Ok(SuccessResponse::new(json!(null), "Bill sent"))
}
