use chrono::Utc;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::CurrentUser;
use shared_models::domain::{Gender, Role};

pub struct TestConfig {
    pub jwt_secret: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/doctorcare_test".to_string(),
            jwt_secret: self.jwt_secret.clone(),
            access_token_expire_minutes: 60 * 24,
            refresh_token_expire_minutes: 60 * 24 * 7,
            cookie_secure: false,
            cookie_domain: "localhost".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            upload_dir: "public/images".to_string(),
            email_api_url: String::new(),
            email_api_key: String::new(),
            email_from: "DoctorCare <no-reply@test>".to_string(),
            port: 0,
        }
    }
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            role: Role::Supporter,
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            role,
        }
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, Role::Admin)
    }

    pub fn doctor(email: &str) -> Self {
        Self::new(email, Role::Doctor)
    }

    pub fn supporter(email: &str) -> Self {
        Self::new(email, Role::Supporter)
    }

    pub fn to_current_user(&self) -> CurrentUser {
        let now = Utc::now().naive_utc();
        CurrentUser {
            id: self.id,
            name: "Test User".to_string(),
            email: self.email.clone(),
            password: String::new(),
            phone: "0123456789".to_string(),
            gender: Gender::Male,
            role_id: self.role as i32,
            description: None,
            address: "1 Test Street".to_string(),
            avatar: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }
}
