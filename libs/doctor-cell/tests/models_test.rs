use serde_json::json;
use uuid::Uuid;

use doctor_cell::models::{CreateBillDto, DoctorProfile, DoctorRow};
use shared_models::domain::Gender;

fn sample_row() -> DoctorRow {
    DoctorRow {
        id: Uuid::nil(),
        name: "Dr. Binh".to_string(),
        email: "binh@clinic.test".to_string(),
        phone: "0901234567".to_string(),
        gender: Gender::Female,
        address: "12 Hang Bai".to_string(),
        avatar: None,
        description: Some("Cardiologist".to_string()),
        clinic_name: "Central Clinic".to_string(),
        clinic_address: "1 Trang Tien".to_string(),
        clinic_description: None,
        clinic_image: None,
        specialization_name: "Cardiology".to_string(),
        specialization_description: Some("Heart".to_string()),
    }
}

#[test]
fn doctor_profile_nests_clinic_and_specialization() {
    let profile = DoctorProfile::from(sample_row());
    let value = serde_json::to_value(&profile).unwrap();

    assert_eq!(value["name"], json!("Dr. Binh"));
    assert_eq!(value["clinic"]["name"], json!("Central Clinic"));
    assert_eq!(value["clinic"]["address"], json!("1 Trang Tien"));
    assert_eq!(value["specialization"]["name"], json!("Cardiology"));
}

#[test]
fn bill_dto_accepts_frontend_payload() {
    let dto: CreateBillDto = serde_json::from_value(json!({
        "patientId": "11111111-2222-3333-4444-555555555555",
        "scheduleId": "66666666-7777-8888-9999-aaaaaaaaaaaa"
    }))
    .unwrap();

    assert_eq!(
        dto.patient_id,
        Uuid::parse_str("11111111-2222-3333-4444-555555555555").unwrap()
    );
}
