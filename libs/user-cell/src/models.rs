use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use shared_models::domain::Gender;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserDto {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub gender: Gender,
    pub address: String,
    pub role_id: i32,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub clinic_id: Option<Uuid>,
    pub specialty_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub gender: Gender,
    pub address: String,
    pub role_id: i32,
    pub description: Option<String>,
    pub clinic_id: Option<Uuid>,
    pub specialty_id: Option<Uuid>,
}

/// Admin listing row: every account, with the clinic/specialization
/// assignment left-joined in for doctors.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    pub role_id: i32,
    pub description: Option<String>,
    pub address: String,
    pub avatar: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub clinic_id: Option<Uuid>,
    pub clinic_name: Option<String>,
    pub specialization_id: Option<Uuid>,
    pub specialization_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAssignment {
    pub clinic_id: Uuid,
    pub clinic_name: String,
    pub specialization_id: Uuid,
    pub specialization_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListing {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    pub role_id: i32,
    pub description: Option<String>,
    pub address: String,
    pub avatar: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub doctor_user: Option<DoctorAssignment>,
}

impl From<UserRow> for UserListing {
    fn from(row: UserRow) -> Self {
        let doctor_user = match (
            row.clinic_id,
            row.clinic_name,
            row.specialization_id,
            row.specialization_name,
        ) {
            (Some(clinic_id), Some(clinic_name), Some(specialization_id), Some(specialization_name)) => {
                Some(DoctorAssignment {
                    clinic_id,
                    clinic_name,
                    specialization_id,
                    specialization_name,
                })
            }
            _ => None,
        };

        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            gender: row.gender,
            role_id: row.role_id,
            description: row.description,
            address: row.address,
            avatar: row.avatar,
            created_at: row.created_at,
            updated_at: row.updated_at,
            doctor_user,
        }
    }
}
