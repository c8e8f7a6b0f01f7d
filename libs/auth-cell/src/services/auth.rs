use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_email::{ForgotPasswordEmail, Mailer};
use shared_models::auth::CurrentUser;
use shared_models::error::AppError;
use shared_utils::jwt::{sign_token, validate_token};
use shared_utils::password::{generate_password, hash_password, verify_password};

pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct AuthService {
    db: PgPool,
    mailer: Mailer,
}

impl AuthService {
    pub fn new(db: &PgPool, mailer: &Mailer) -> Self {
        Self {
            db: db.clone(),
            mailer: mailer.clone(),
        }
    }

    pub async fn login(
        &self,
        config: &AppConfig,
        username: &str,
        password: &str,
    ) -> Result<(CurrentUser, TokenPair), AppError> {
        let email = username.trim().to_lowercase();

        let user = sqlx::query_as::<_, CurrentUser>(
            "SELECT * FROM users WHERE email = $1 AND is_deleted = FALSE",
        )
        .bind(&email)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::Auth("Incorrect email or password".to_string()))?;

        let valid = verify_password(password, &user.password)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::Auth("Incorrect email or password".to_string()));
        }

        let tokens = self.issue_tokens(config, &user).await?;
        debug!("User {} signed in", user.id);

        Ok((user, tokens))
    }

    /// Rotates the token pair from a refresh cookie. The presented token must
    /// match the one stored for the user, a rotated-out token is dead.
    pub async fn refresh(
        &self,
        config: &AppConfig,
        refresh_token: &str,
    ) -> Result<(CurrentUser, TokenPair), AppError> {
        let claims = validate_token(refresh_token, &config.jwt_secret).map_err(AppError::Auth)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Auth("Invalid token subject".to_string()))?;

        let user = sqlx::query_as::<_, CurrentUser>(
            "SELECT * FROM users WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::Auth("User not found".to_string()))?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            return Err(AppError::Auth("Refresh token is no longer valid".to_string()));
        }

        let tokens = self.issue_tokens(config, &user).await?;

        Ok((user, tokens))
    }

    async fn issue_tokens(
        &self,
        config: &AppConfig,
        user: &CurrentUser,
    ) -> Result<TokenPair, AppError> {
        let access_token = sign_token(user, &config.jwt_secret, config.access_token_expire_minutes)
            .map_err(AppError::Internal)?;
        let refresh_token =
            sign_token(user, &config.jwt_secret, config.refresh_token_expire_minutes)
                .map_err(AppError::Internal)?;

        sqlx::query(
            "UPDATE users SET refresh_token = $2, updated_at = now() AT TIME ZONE 'utc'
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&refresh_token)
        .execute(&self.db)
        .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    pub async fn logout(&self, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET refresh_token = NULL WHERE id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        debug!("User {} signed out", user_id);
        Ok(())
    }

    /// Replaces the password with a random 8-character one and mails it out.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let email = email.trim().to_lowercase();

        let user = sqlx::query_as::<_, CurrentUser>(
            "SELECT * FROM users WHERE email = $1 AND is_deleted = FALSE",
        )
        .bind(&email)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Email is not registered".to_string()))?;

        let new_password = generate_password(8);
        let password_hash = hash_password(&new_password)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        sqlx::query(
            "UPDATE users SET password = $2, updated_at = now() AT TIME ZONE 'utc'
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&password_hash)
        .execute(&self.db)
        .await?;

        let mail = ForgotPasswordEmail {
            name: user.name.clone(),
            new_password,
        };
        if let Err(err) = self.mailer.send_forgot_password(&user.email, &mail).await {
            warn!("Forgot-password email to {} failed: {}", user.email, err);
        }

        Ok(())
    }

    pub async fn change_password(
        &self,
        user: &CurrentUser,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let valid = verify_password(old_password, &user.password)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::Auth("Old password is incorrect".to_string()));
        }

        if new_password.len() < 6 {
            return Err(AppError::ValidationError(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        let password_hash = hash_password(new_password)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        sqlx::query(
            "UPDATE users SET password = $2, updated_at = now() AT TIME ZONE 'utc'
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&password_hash)
        .execute(&self.db)
        .await?;

        debug!("User {} changed password", user.id);
        Ok(())
    }
}
