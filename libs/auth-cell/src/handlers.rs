use axum::{
    extract::{Extension, State},
    response::IntoResponse,
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::auth::CurrentUser;
use shared_models::error::AppError;
use shared_models::response::SuccessResponse;

use crate::models::{ChangePasswordDto, ForgotPasswordDto, LoginForm};
use crate::services::auth::TokenPair;
use crate::services::AuthService;

const REFRESH_COOKIE: &str = "refresh_token";

fn refresh_cookie(state: &AppState, value: String) -> Cookie<'static> {
    let mut builder = Cookie::build((REFRESH_COOKIE, value))
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/");

    if !state.config.cookie_domain.is_empty() {
        builder = builder.domain(state.config.cookie_domain.clone());
    }

    builder.build()
}

fn session_payload(user: &CurrentUser, tokens: &TokenPair) -> Value {
    json!({
        "user": {
            "id": user.id,
            "email": user.email,
            "name": user.name,
            "address": user.address,
            "phone": user.phone,
            "gender": user.gender,
            "roleId": user.role_id,
            "avatar": user.avatar,
        },
        "access_token": tokens.access_token,
    })
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    let (user, tokens) = AuthService::new(&state.db, &state.mailer)
        .login(&state.config, &form.username, &form.password)
        .await?;

    let jar = jar.add(refresh_cookie(&state, tokens.refresh_token.clone()));
    let body = SuccessResponse::created(session_payload(&user, &tokens), "Signed in");

    Ok((jar, body))
}

#[axum::debug_handler]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::Auth("Missing refresh token".to_string()))?;

    let (user, tokens) = AuthService::new(&state.db, &state.mailer)
        .refresh(&state.config, &token)
        .await?;

    let jar = jar.add(refresh_cookie(&state, tokens.refresh_token.clone()));
    let body = SuccessResponse::new(session_payload(&user, &tokens), "Token refreshed");

    Ok((jar, body))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.mailer).logout(user.id).await?;

    let jar = jar.remove(Cookie::build((REFRESH_COOKIE, "")).path("/").build());
    let body = SuccessResponse::new(json!(null), "Signed out");

    Ok((jar, body))
}

pub async fn account(
    Extension(user): Extension<CurrentUser>,
) -> Result<SuccessResponse<Value>, AppError> {
    Ok(SuccessResponse::new(json!(user), "Account fetched"))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(dto): Json<ForgotPasswordDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    AuthService::new(&state.db, &state.mailer)
        .forgot_password(&dto.email)
        .await?;

    Ok(SuccessResponse::new(
        json!(null),
        "A new password has been sent to your email",
    ))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(dto): Json<ChangePasswordDto>,
) -> Result<SuccessResponse<Value>, AppError> {
    AuthService::new(&state.db, &state.mailer)
        .change_password(&user, &dto.old_password, &dto.new_password)
        .await?;

    Ok(SuccessResponse::new(json!(null), "Password changed"))
}
