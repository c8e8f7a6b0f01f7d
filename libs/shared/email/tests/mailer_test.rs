use chrono::NaiveDate;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use shared_email::{BookingEmail, ForgotPasswordEmail, Mailer};

fn test_config(api_url: String) -> AppConfig {
    AppConfig {
        database_url: String::new(),
        jwt_secret: "test-secret".to_string(),
        access_token_expire_minutes: 60,
        refresh_token_expire_minutes: 120,
        cookie_secure: false,
        cookie_domain: "localhost".to_string(),
        cors_origins: vec![],
        upload_dir: "public/images".to_string(),
        email_api_url: api_url,
        email_api_key: "test-key".to_string(),
        email_from: "DoctorCare <no-reply@test>".to_string(),
        port: 0,
    }
}

fn booking() -> BookingEmail {
    BookingEmail {
        doctor: "Tran Thi B".to_string(),
        start_time: NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap(),
        end_time: NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap(),
    }
}

#[tokio::test]
async fn booking_success_posts_to_email_api() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "to": ["patient@example.com"],
            "subject": "DoctorCare booking confirmed",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "1" })))
        .expect(1)
        .mount(&server)
        .await;

    let mailer = Mailer::new(&test_config(format!("{}/emails", server.uri())));
    let result = mailer
        .send_booking_success("patient@example.com", &booking())
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn api_failure_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let mailer = Mailer::new(&test_config(format!("{}/emails", server.uri())));
    let result = mailer
        .send_forgot_password(
            "user@example.com",
            &ForgotPasswordEmail {
                name: "Tester".to_string(),
                new_password: "x".to_string(),
            },
        )
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn unconfigured_mailer_is_a_noop() {
    let mailer = Mailer::new(&test_config(String::new()));
    let result = mailer
        .send_booking_failed("patient@example.com", &booking())
        .await;

    assert!(result.is_ok());
}
