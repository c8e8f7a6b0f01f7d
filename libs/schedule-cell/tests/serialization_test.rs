use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use schedule_cell::models::{ChangeStatusDto, CreateScheduleDto, Schedule};
use shared_models::domain::BookingStatus;

#[test]
fn schedule_serializes_with_camel_case_keys() {
    let schedule = Schedule {
        id: Uuid::nil(),
        doctor_id: Uuid::nil(),
        start_time: NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        end_time: NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap(),
        price: 500_000,
        max_booking: 5,
        sum_booking: 2,
    };

    let value = serde_json::to_value(&schedule).unwrap();
    assert_eq!(value["doctorId"], json!("00000000-0000-0000-0000-000000000000"));
    assert_eq!(value["startTime"], json!("2025-06-10T09:00:00"));
    assert_eq!(value["maxBooking"], json!(5));
    assert_eq!(value["sumBooking"], json!(2));
}

#[test]
fn create_schedule_dto_accepts_frontend_payload() {
    let dto: CreateScheduleDto = serde_json::from_value(json!({
        "startTime": "2025-06-10T09:00:00",
        "endTime": "2025-06-10T11:00:00",
        "price": 500000,
        "maxBooking": 3
    }))
    .unwrap();

    assert_eq!(dto.max_booking, 3);
    assert_eq!(dto.price, 500_000);
}

#[test]
fn change_status_dto_accepts_frontend_payload() {
    let dto: ChangeStatusDto = serde_json::from_value(json!({
        "patientId": "11111111-2222-3333-4444-555555555555",
        "scheduleId": "66666666-7777-8888-9999-aaaaaaaaaaaa",
        "status": "Accept"
    }))
    .unwrap();

    assert_eq!(dto.status, BookingStatus::Accept);
}
