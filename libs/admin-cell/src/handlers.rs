use axum::extract::{Extension, State};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::auth::CurrentUser;
use shared_models::error::AppError;
use shared_models::response::SuccessResponse;

use crate::services::DashboardService;

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<SuccessResponse<Value>, AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can view the dashboard".to_string(),
        ));
    }

    let stats = DashboardService::new(&state.db).stats().await?;
    Ok(SuccessResponse::new(json!(stats), "Dashboard statistics fetched"))
}
