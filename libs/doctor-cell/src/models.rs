use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use shared_models::domain::Gender;

/// Flat join of users + doctor_user + clinics + specializations, one row per
/// doctor assignment.
#[derive(Debug, Clone, FromRow)]
pub struct DoctorRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    pub address: String,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub clinic_name: String,
    pub clinic_address: String,
    pub clinic_description: Option<String>,
    pub clinic_image: Option<String>,
    pub specialization_name: String,
    pub specialization_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClinicRef {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SpecialtyRef {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DoctorProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    pub address: String,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub clinic: ClinicRef,
    pub specialization: SpecialtyRef,
}

impl From<DoctorRow> for DoctorProfile {
    fn from(row: DoctorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            gender: row.gender,
            address: row.address,
            avatar: row.avatar,
            description: row.description,
            clinic: ClinicRef {
                name: row.clinic_name,
                address: row.clinic_address,
                description: row.clinic_description,
                image: row.clinic_image,
            },
            specialization: SpecialtyRef {
                name: row.specialization_name,
                description: row.specialization_description,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillDto {
    pub patient_id: Uuid,
    pub schedule_id: Uuid,
}
