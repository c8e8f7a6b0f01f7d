use serde_json::json;
use uuid::Uuid;

use patient_cell::models::{BookingConfirmation, CreatePatientDto};
use shared_models::domain::Gender;

#[test]
fn booking_payload_deserializes() {
    let dto: CreatePatientDto = serde_json::from_value(json!({
        "scheduleId": "66666666-7777-8888-9999-aaaaaaaaaaaa",
        "name": "Nguyen Van A",
        "email": "a@example.com",
        "phone": "0909090909",
        "gender": "Male",
        "address": "Hanoi",
        "description": null
    }))
    .unwrap();

    assert_eq!(dto.gender, Gender::Male);
    assert_eq!(dto.name, "Nguyen Van A");
    assert!(dto.description.is_none());
}

#[test]
fn confirmation_serializes_with_camel_case_keys() {
    let confirmation = BookingConfirmation {
        patient_id: Uuid::nil(),
        schedule_id: Uuid::nil(),
    };

    let value = serde_json::to_value(&confirmation).unwrap();
    assert!(value.get("patientId").is_some());
    assert!(value.get("scheduleId").is_some());
}
