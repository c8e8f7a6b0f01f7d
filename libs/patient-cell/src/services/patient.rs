use chrono::NaiveDateTime;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use shared_email::{BookingEmail, Mailer, NewBookingEmail};
use shared_models::error::AppError;

use crate::models::{BookingConfirmation, CreatePatientDto};

#[derive(sqlx::FromRow)]
struct ScheduleInfo {
    doctor_name: String,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
}

pub struct PatientService {
    db: PgPool,
    mailer: Mailer,
}

impl PatientService {
    pub fn new(db: &PgPool, mailer: &Mailer) -> Self {
        Self {
            db: db.clone(),
            mailer: mailer.clone(),
        }
    }

    /// Anonymous booking: creates the patient, takes one slot on the schedule
    /// and records a Pending booking, all in one transaction. The slot is
    /// taken with a guarded update so the counter can never pass max_booking,
    /// no matter how many requests race for the last slot.
    pub async fn book(&self, dto: CreatePatientDto) -> Result<BookingConfirmation, AppError> {
        if dto.name.trim().is_empty() || dto.email.trim().is_empty() || dto.phone.trim().is_empty()
        {
            return Err(AppError::ValidationError(
                "Name, email and phone are required".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let schedule = sqlx::query_as::<_, ScheduleInfo>(
            "SELECT u.name AS doctor_name, s.start_time, s.end_time
             FROM schedules s
             JOIN users u ON u.id = s.doctor_id
             WHERE s.id = $1 AND s.is_deleted = FALSE",
        )
        .bind(dto.schedule_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Schedule not found".to_string()))?;

        let taken = sqlx::query(
            "UPDATE schedules
             SET sum_booking = sum_booking + 1, updated_at = now() AT TIME ZONE 'utc'
             WHERE id = $1 AND sum_booking < max_booking",
        )
        .bind(dto.schedule_id)
        .execute(&mut *tx)
        .await?;

        if taken.rows_affected() == 0 {
            return Err(AppError::BadRequest("Schedule is fully booked".to_string()));
        }

        let patient_id: Uuid = sqlx::query_scalar(
            "INSERT INTO patients (name, email, phone, gender, address, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(dto.gender)
        .bind(&dto.address)
        .bind(&dto.description)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO patient_schedule (patient_id, schedule_id, status)
             VALUES ($1, $2, 'Pending')",
        )
        .bind(patient_id)
        .bind(dto.schedule_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Patient {} booked schedule {}", patient_id, dto.schedule_id);

        let email = NewBookingEmail {
            booking: BookingEmail {
                doctor: schedule.doctor_name,
                start_time: schedule.start_time,
                end_time: schedule.end_time,
            },
            name: dto.name,
            phone: dto.phone,
            email: dto.email.clone(),
            address: dto.address,
            description: dto.description.unwrap_or_default(),
        };
        if let Err(err) = self.mailer.send_booking_new(&dto.email, &email).await {
            warn!("Booking confirmation email to {} failed: {}", dto.email, err);
        }

        Ok(BookingConfirmation {
            patient_id,
            schedule_id: dto.schedule_id,
        })
    }
}
