use axum::{
    extract::{Extension, Multipart, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_database::AppState;
use shared_models::auth::CurrentUser;
use shared_models::error::AppError;
use shared_models::response::SuccessResponse;
use shared_utils::upload::save_image;

use crate::models::{CreateClinicDto, UpdateClinicDto};
use crate::services::ClinicService;

fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can manage clinics".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_clinics(
    State(state): State<AppState>,
) -> Result<SuccessResponse<Value>, AppError> {
    let clinics = ClinicService::new(&state.db).list().await?;
    Ok(SuccessResponse::new(json!(clinics), "Clinics fetched"))
}

pub async fn create_clinic(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(dto): Json<CreateClinicDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    if dto.name.trim().is_empty() {
        return Err(AppError::ValidationError("Clinic name is required".to_string()));
    }

    let clinic = ClinicService::new(&state.db).create(dto).await?;
    Ok(SuccessResponse::created(json!(clinic), "Clinic created"))
}

pub async fn update_clinic(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateClinicDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    let clinic = ClinicService::new(&state.db).update(id, dto).await?;
    Ok(SuccessResponse::new(json!(clinic), "Clinic updated"))
}

pub async fn delete_clinic(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    ClinicService::new(&state.db).delete(id).await?;
    Ok(SuccessResponse::new(json!(null), "Clinic deleted"))
}

#[axum::debug_handler]
pub async fn upload_clinic_image(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    let file_name = save_image(multipart, "clinicImage", &state.config.upload_dir, "clinics").await?;
    Ok(SuccessResponse::created(
        json!({ "image": file_name }),
        "Clinic image uploaded",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_utils::test_utils::TestUser;

    #[test]
    fn only_admin_passes_guard() {
        assert!(require_admin(&TestUser::admin("admin@example.com").to_current_user()).is_ok());
        assert!(require_admin(&TestUser::doctor("doc@example.com").to_current_user()).is_err());
        assert!(require_admin(&TestUser::supporter("sup@example.com").to_current_user()).is_err());
    }
}
