use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::templates::{
    render_bill, render_booking_failed, render_booking_new, render_booking_success,
    render_forgot_password, BillEmail, BookingEmail, ForgotPasswordEmail, NewBookingEmail,
};

/// Transactional mail client. Posts rendered HTML to an HTTP email-delivery
/// API; when no endpoint is configured the send becomes a no-op so local
/// development works without credentials.
#[derive(Clone)]
pub struct Mailer {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl Mailer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.email_api_url.clone(),
            api_key: config.email_api_key.clone(),
            from: config.email_from.clone(),
        }
    }

    async fn send(&self, to: &str, subject: &str, html: String) -> Result<()> {
        if self.api_url.is_empty() {
            debug!("Email delivery disabled, skipping '{}' to {}", subject, to);
            return Ok(());
        }

        let body = json!({
            "from": self.from,
            "to": [to],
            "subject": subject,
            "html": html,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Email API error ({}): {}", status, error_text);
            return Err(anyhow!("Email API error ({}): {}", status, error_text));
        }

        debug!("Sent '{}' to {}", subject, to);
        Ok(())
    }

    pub async fn send_booking_new(&self, to: &str, data: &NewBookingEmail) -> Result<()> {
        self.send(to, "DoctorCare booking received", render_booking_new(data))
            .await
    }

    pub async fn send_booking_success(&self, to: &str, data: &BookingEmail) -> Result<()> {
        self.send(to, "DoctorCare booking confirmed", render_booking_success(data))
            .await
    }

    pub async fn send_booking_failed(&self, to: &str, data: &BookingEmail) -> Result<()> {
        self.send(to, "DoctorCare booking cancelled", render_booking_failed(data))
            .await
    }

    pub async fn send_bill(&self, to: &str, data: &BillEmail) -> Result<()> {
        self.send(to, "DoctorCare consultation bill", render_bill(data))
            .await
    }

    pub async fn send_forgot_password(&self, to: &str, data: &ForgotPasswordEmail) -> Result<()> {
        self.send(to, "Your new DoctorCare password", render_forgot_password(data))
            .await
    }
}
