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

use crate::models::{ChangeStatusDto, CreateScheduleDto, UpdateScheduleDto};
use crate::services::{BookingService, ScheduleService};

fn require_doctor(user: &CurrentUser) -> Result<(), AppError> {
    if !user.is_doctor() {
        return Err(AppError::Forbidden(
            "Only doctors can manage schedules".to_string(),
        ));
    }
    Ok(())
}

fn require_supporter(user: &CurrentUser) -> Result<(), AppError> {
    if !user.is_supporter() {
        return Err(AppError::Forbidden(
            "Only supporters can manage bookings".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_schedules_for_doctor(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_doctor(&user)?;

    let schedules = ScheduleService::new(&state.db).list_for_doctor(user.id).await?;
    Ok(SuccessResponse::new(json!(schedules), "Schedules fetched"))
}

pub async fn list_accepted_schedules(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_doctor(&user)?;

    let schedules = ScheduleService::new(&state.db)
        .list_accepted_for_doctor(user.id)
        .await?;
    Ok(SuccessResponse::new(json!(schedules), "Accepted bookings fetched"))
}

pub async fn list_bookings_for_supporter(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_supporter(&user)?;

    let grouped = BookingService::new(&state.db, &state.mailer)
        .list_grouped_by_status()
        .await?;
    Ok(SuccessResponse::new(json!(grouped), "Bookings fetched"))
}

pub async fn list_available_schedules(
    State(state): State<AppState>,
    Path(doctor_id): Path<Uuid>,
) -> Result<SuccessResponse<Value>, AppError> {
    let schedules = ScheduleService::new(&state.db).list_available(doctor_id).await?;
    Ok(SuccessResponse::new(json!(schedules), "Available schedules fetched"))
}

pub async fn create_schedule(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(dto): Json<CreateScheduleDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_doctor(&user)?;

    let schedule = ScheduleService::new(&state.db).create(user.id, dto).await?;
    Ok(SuccessResponse::created(json!(schedule), "Schedule created"))
}

pub async fn update_schedule(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(dto): Json<UpdateScheduleDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_doctor(&user)?;

    let schedule = ScheduleService::new(&state.db).update(user.id, dto).await?;
    Ok(SuccessResponse::new(json!(schedule), "Schedule updated"))
}

pub async fn change_booking_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(dto): Json<ChangeStatusDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_supporter(&user)?;

    let status = BookingService::new(&state.db, &state.mailer)
        .change_status(dto)
        .await?;
    Ok(SuccessResponse::new(
        json!({ "status": status }),
        "Booking status changed",
    ))
}

pub async fn delete_schedule(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_doctor(&user)?;

    ScheduleService::new(&state.db).delete(user.id, id).await?;
    Ok(SuccessResponse::new(json!(null), "Schedule deleted"))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((patient_id, schedule_id)): Path<(Uuid, Uuid)>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_supporter(&user)?;

    BookingService::new(&state.db, &state.mailer)
        .delete(patient_id, schedule_id)
        .await?;
    Ok(SuccessResponse::new(json!(null), "Booking deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_utils::test_utils::TestUser;

    #[test]
    fn schedule_management_is_doctor_only() {
        assert!(require_doctor(&TestUser::doctor("d@example.com").to_current_user()).is_ok());
        assert!(require_doctor(&TestUser::admin("a@example.com").to_current_user()).is_err());
        assert!(require_doctor(&TestUser::supporter("s@example.com").to_current_user()).is_err());
    }

    #[test]
    fn booking_management_is_supporter_only() {
        assert!(require_supporter(&TestUser::supporter("s@example.com").to_current_user()).is_ok());
        assert!(require_supporter(&TestUser::doctor("d@example.com").to_current_user()).is_err());
        assert!(require_supporter(&TestUser::admin("a@example.com").to_current_user()).is_err());
    }
}
