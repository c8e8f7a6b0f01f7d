use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::domain::Gender;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientDto {
    pub schedule_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    pub address: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub patient_id: Uuid,
    pub schedule_id: Uuid,
}
