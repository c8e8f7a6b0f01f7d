use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Gender, Role};

/// Claims carried by access and refresh tokens. Mirrors the columns the
/// frontend needs to render the session without another round trip.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "roleId")]
    pub role_id: Option<i32>,
}

/// The authenticated user row, loaded by the auth middleware and attached to
/// request extensions.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: String,
    pub gender: Gender,
    pub role_id: i32,
    pub description: Option<String>,
    pub address: String,
    pub avatar: Option<String>,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub is_deleted: bool,
}

impl CurrentUser {
    pub fn role(&self) -> Option<Role> {
        Role::from_id(self.role_id)
    }

    pub fn is_admin(&self) -> bool {
        self.role_id == Role::Admin as i32
    }

    pub fn is_doctor(&self) -> bool {
        self.role_id == Role::Doctor as i32
    }

    pub fn is_supporter(&self) -> bool {
        self.role_id == Role::Supporter as i32
    }
}
