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

use crate::models::{CreateSpecialtyDto, UpdateSpecialtyDto};
use crate::services::SpecialtyService;

/// Multipart field name the web client sends the image under.
pub const IMAGE_FIELD: &str = "specImage";

fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can manage specializations".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_specialties(
    State(state): State<AppState>,
) -> Result<SuccessResponse<Value>, AppError> {
    let specialties = SpecialtyService::new(&state.db).list().await?;
    Ok(SuccessResponse::new(json!(specialties), "Specializations fetched"))
}

pub async fn create_specialty(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(dto): Json<CreateSpecialtyDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    if dto.name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Specialization name is required".to_string(),
        ));
    }

    let specialty = SpecialtyService::new(&state.db).create(dto).await?;
    Ok(SuccessResponse::created(json!(specialty), "Specialization created"))
}

pub async fn update_specialty(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateSpecialtyDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    let specialty = SpecialtyService::new(&state.db).update(id, dto).await?;
    Ok(SuccessResponse::new(json!(specialty), "Specialization updated"))
}

pub async fn delete_specialty(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    SpecialtyService::new(&state.db).delete(id).await?;
    Ok(SuccessResponse::new(json!(null), "Specialization deleted"))
}

#[axum::debug_handler]
pub async fn upload_specialty_image(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    let file_name = save_image(
        multipart,
        IMAGE_FIELD,
        &state.config.upload_dir,
        "specializations",
    )
    .await?;

    Ok(SuccessResponse::created(
        json!({ "image": file_name }),
        "Specialization image uploaded",
    ))
}
