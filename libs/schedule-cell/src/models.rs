use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use shared_models::domain::{BookingStatus, Gender};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub price: i64,
    pub max_booking: i32,
    pub sum_booking: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleDto {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub price: i64,
    pub max_booking: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleDto {
    pub id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub price: i64,
    pub max_booking: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusDto {
    pub patient_id: Uuid,
    pub schedule_id: Uuid,
    pub status: BookingStatus,
}

#[derive(Debug, Serialize)]
pub struct PatientRef {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub gender: Gender,
    pub address: String,
    pub description: Option<String>,
}

/// One booking attached to a schedule in doctor-facing listings.
#[derive(Debug, Serialize)]
pub struct BookingEntry {
    pub status: BookingStatus,
    pub patient: PatientRef,
}

/// Doctor-facing schedule with its Accept/Done bookings attached.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWithBookings {
    pub id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub price: i64,
    pub max_booking: i32,
    pub bookings: Vec<BookingEntry>,
}

/// Supporter-facing booking: patient plus the schedule and doctor it points at.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupporterBooking {
    pub patient: PatientRef,
    pub schedule_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub price: i64,
    pub max_booking: i32,
    pub doctor: DoctorRef,
}

#[derive(Debug, Serialize)]
pub struct DoctorRef {
    pub name: String,
    pub phone: String,
}

/// Flat row behind both doctor and supporter booking listings.
#[derive(Debug, FromRow)]
pub struct BookingRow {
    pub schedule_id: Uuid,
    pub status: BookingStatus,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub price: i64,
    pub max_booking: i32,
    pub doctor_name: String,
    pub doctor_phone: String,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_email: String,
    pub patient_gender: Gender,
    pub patient_address: String,
    pub patient_description: Option<String>,
}

impl BookingRow {
    pub fn patient(&self) -> PatientRef {
        PatientRef {
            id: self.patient_id,
            name: self.patient_name.clone(),
            phone: self.patient_phone.clone(),
            email: self.patient_email.clone(),
            gender: self.patient_gender,
            address: self.patient_address.clone(),
            description: self.patient_description.clone(),
        }
    }
}
