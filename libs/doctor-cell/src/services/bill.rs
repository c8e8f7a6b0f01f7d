use chrono::NaiveDateTime;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use shared_email::{BillEmail, BookingEmail, Mailer};
use shared_models::domain::{BookingStatus, Role};
use shared_models::error::AppError;

use crate::models::CreateBillDto;

#[derive(sqlx::FromRow)]
struct BillRow {
    patient_email: String,
    status: BookingStatus,
    doctor_name: String,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    price: i64,
}

pub struct BillService {
    db: PgPool,
    mailer: Mailer,
}

impl BillService {
    pub fn new(db: &PgPool, mailer: &Mailer) -> Self {
        Self {
            db: db.clone(),
            mailer: mailer.clone(),
        }
    }

    /// Marks an accepted booking as Done and emails the bill to the patient.
    /// Only the scheduled doctor may issue the bill.
    pub async fn send_bill(&self, doctor_id: Uuid, dto: CreateBillDto) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, BillRow>(
            "SELECT p.email AS patient_email, ps.status,
                    u.name AS doctor_name, s.start_time, s.end_time, s.price
             FROM patient_schedule ps
             JOIN patients p ON p.id = ps.patient_id
             JOIN schedules s ON s.id = ps.schedule_id
             JOIN users u ON u.id = s.doctor_id
             WHERE ps.patient_id = $1 AND ps.schedule_id = $2 AND ps.is_deleted = FALSE",
        )
        .bind(dto.patient_id)
        .bind(dto.schedule_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let owns_schedule: Option<Uuid> = sqlx::query_scalar(
            "SELECT doctor_id FROM schedules WHERE id = $1",
        )
        .bind(dto.schedule_id)
        .fetch_optional(&mut *tx)
        .await?;

        if owns_schedule != Some(doctor_id) {
            return Err(AppError::Forbidden(
                "Only the scheduled doctor can issue this bill".to_string(),
            ));
        }

        if !row.status.can_transition_to(BookingStatus::Done, Role::Doctor) {
            return Err(AppError::BadRequest(format!(
                "Cannot bill a booking in status {}",
                row.status.as_str()
            )));
        }

        // Re-assert the observed status so a concurrent change cannot be
        // overwritten after the read.
        let updated = sqlx::query(
            "UPDATE patient_schedule
             SET status = 'Done', updated_at = now() AT TIME ZONE 'utc'
             WHERE patient_id = $1 AND schedule_id = $2 AND status = $3",
        )
        .bind(dto.patient_id)
        .bind(dto.schedule_id)
        .bind(row.status)
        .execute(&mut *tx)
        .await?;
        row.status.ensure_updated(updated.rows_affected(), BookingStatus::Done)?;

        tx.commit().await?;

        let email = BillEmail {
            booking: BookingEmail {
                doctor: row.doctor_name,
                start_time: row.start_time,
                end_time: row.end_time,
            },
            price: row.price,
        };

        // The status change is already committed; a delivery failure is not
        // a reason to fail the request.
        if let Err(err) = self.mailer.send_bill(&row.patient_email, &email).await {
            warn!("Bill email to {} failed: {}", row.patient_email, err);
        }

        Ok(())
    }
}
