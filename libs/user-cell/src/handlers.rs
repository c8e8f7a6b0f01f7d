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

use crate::models::{RegisterUserDto, UpdateUserDto};
use crate::services::UserService;

fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can manage accounts".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    let users = UserService::new(&state.db).list().await?;
    Ok(SuccessResponse::new(json!(users), "Users fetched"))
}

pub async fn create_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(dto): Json<RegisterUserDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    if dto.password.len() < 6 {
        return Err(AppError::ValidationError(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    let id = UserService::new(&state.db).create(dto).await?;
    Ok(SuccessResponse::created(json!({ "id": id }), "User created"))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(dto): Json<UpdateUserDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    let id = dto.id;
    UserService::new(&state.db).update(dto).await?;
    Ok(SuccessResponse::new(json!({ "id": id }), "User updated"))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<SuccessResponse<Value>, AppError> {
    require_admin(&user)?;

    if user.id == id {
        return Err(AppError::BadRequest(
            "Cannot delete the account you are signed in with".to_string(),
        ));
    }

    UserService::new(&state.db).delete(id).await?;
    Ok(SuccessResponse::new(json!(null), "User deleted"))
}

/// Any authenticated user can replace their own avatar.
#[axum::debug_handler]
pub async fn upload_avatar(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> Result<SuccessResponse<Value>, AppError> {
    let file_name = save_image(multipart, "avatar", &state.config.upload_dir, "users").await?;

    UserService::new(&state.db).set_avatar(user.id, &file_name).await?;

    Ok(SuccessResponse::created(
        json!({ "avatar": file_name }),
        "Avatar uploaded",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_utils::test_utils::TestUser;

    #[test]
    fn account_management_is_admin_only() {
        assert!(require_admin(&TestUser::admin("admin@example.com").to_current_user()).is_ok());
        assert!(require_admin(&TestUser::doctor("doc@example.com").to_current_user()).is_err());
        assert!(require_admin(&TestUser::supporter("sup@example.com").to_current_user()).is_err());
    }
}
