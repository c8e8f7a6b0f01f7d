use std::collections::HashMap;

use chrono::NaiveDateTime;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use shared_email::{BookingEmail, Mailer};
use shared_models::domain::{BookingStatus, Role};
use shared_models::error::AppError;

use crate::models::{BookingRow, ChangeStatusDto, DoctorRef, SupporterBooking};

#[derive(sqlx::FromRow)]
struct ChangeStatusRow {
    status: BookingStatus,
    patient_email: String,
    doctor_name: String,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
}

pub struct BookingService {
    db: PgPool,
    mailer: Mailer,
}

impl BookingService {
    pub fn new(db: &PgPool, mailer: &Mailer) -> Self {
        Self {
            db: db.clone(),
            mailer: mailer.clone(),
        }
    }

    /// Every booking in the system, grouped by status, for the supporter
    /// dashboard.
    pub async fn list_grouped_by_status(
        &self,
    ) -> Result<HashMap<&'static str, Vec<SupporterBooking>>, AppError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT ps.schedule_id, ps.status,
                    s.start_time, s.end_time, s.price, s.max_booking,
                    d.name AS doctor_name, d.phone AS doctor_phone,
                    p.id AS patient_id, p.name AS patient_name,
                    p.phone AS patient_phone, p.email AS patient_email,
                    p.gender AS patient_gender, p.address AS patient_address,
                    p.description AS patient_description
             FROM patient_schedule ps
             JOIN schedules s ON s.id = ps.schedule_id
             JOIN users d ON d.id = s.doctor_id
             JOIN patients p ON p.id = ps.patient_id
             WHERE ps.is_deleted = FALSE
             ORDER BY s.start_time",
        )
        .fetch_all(&self.db)
        .await?;

        let mut grouped: HashMap<&'static str, Vec<SupporterBooking>> = HashMap::new();
        for row in rows {
            let booking = SupporterBooking {
                patient: row.patient(),
                schedule_id: row.schedule_id,
                start_time: row.start_time,
                end_time: row.end_time,
                price: row.price,
                max_booking: row.max_booking,
                doctor: DoctorRef {
                    name: row.doctor_name.clone(),
                    phone: row.doctor_phone.clone(),
                },
            };
            grouped.entry(row.status.as_str()).or_default().push(booking);
        }

        Ok(grouped)
    }

    /// Supporter resolves a pending booking. Only Pending→Accept and
    /// Pending→Reject are allowed; the patient is notified either way.
    pub async fn change_status(&self, dto: ChangeStatusDto) -> Result<BookingStatus, AppError> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, ChangeStatusRow>(
            "SELECT ps.status, p.email AS patient_email,
                    d.name AS doctor_name, s.start_time, s.end_time
             FROM patient_schedule ps
             JOIN patients p ON p.id = ps.patient_id
             JOIN schedules s ON s.id = ps.schedule_id
             JOIN users d ON d.id = s.doctor_id
             WHERE ps.patient_id = $1 AND ps.schedule_id = $2 AND ps.is_deleted = FALSE",
        )
        .bind(dto.patient_id)
        .bind(dto.schedule_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if !row.status.can_transition_to(dto.status, Role::Supporter) {
            return Err(AppError::BadRequest(format!(
                "Cannot change booking status from {} to {}",
                row.status.as_str(),
                dto.status.as_str()
            )));
        }

        // Re-assert the observed status so a concurrent resolution cannot be
        // overwritten after the read.
        let updated = sqlx::query(
            "UPDATE patient_schedule
             SET status = $3, updated_at = now() AT TIME ZONE 'utc'
             WHERE patient_id = $1 AND schedule_id = $2 AND status = $4",
        )
        .bind(dto.patient_id)
        .bind(dto.schedule_id)
        .bind(dto.status)
        .bind(row.status)
        .execute(&mut *tx)
        .await?;
        row.status.ensure_updated(updated.rows_affected(), dto.status)?;

        tx.commit().await?;
        debug!(
            "Booking {}/{} moved to {}",
            dto.patient_id,
            dto.schedule_id,
            dto.status.as_str()
        );

        let email = BookingEmail {
            doctor: row.doctor_name,
            start_time: row.start_time,
            end_time: row.end_time,
        };

        let sent = match dto.status {
            BookingStatus::Accept => {
                self.mailer
                    .send_booking_success(&row.patient_email, &email)
                    .await
            }
            _ => {
                self.mailer
                    .send_booking_failed(&row.patient_email, &email)
                    .await
            }
        };
        if let Err(err) = sent {
            warn!("Booking status email to {} failed: {}", row.patient_email, err);
        }

        Ok(dto.status)
    }

    /// Supporter removes a booking; the schedule's counter goes down by
    /// exactly one in the same transaction.
    pub async fn delete(&self, patient_id: Uuid, schedule_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        let deleted = sqlx::query(
            "DELETE FROM patient_schedule WHERE patient_id = $1 AND schedule_id = $2",
        )
        .bind(patient_id)
        .bind(schedule_id)
        .execute(&mut *tx)
        .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }

        sqlx::query(
            "UPDATE schedules
             SET sum_booking = sum_booking - 1, updated_at = now() AT TIME ZONE 'utc'
             WHERE id = $1 AND sum_booking > 0",
        )
        .bind(schedule_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Deleted booking {}/{}", patient_id, schedule_id);

        Ok(())
    }
}
