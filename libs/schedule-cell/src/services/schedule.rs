use std::collections::HashMap;

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    BookingEntry, BookingRow, CreateScheduleDto, Schedule, ScheduleWithBookings,
    UpdateScheduleDto,
};
use crate::services::time::{validate_range, vietnam_today_start};

const BOOKING_SELECT: &str = "SELECT ps.schedule_id, ps.status,
        s.start_time, s.end_time, s.price, s.max_booking,
        d.name AS doctor_name, d.phone AS doctor_phone,
        p.id AS patient_id, p.name AS patient_name, p.phone AS patient_phone,
        p.email AS patient_email, p.gender AS patient_gender,
        p.address AS patient_address, p.description AS patient_description
     FROM patient_schedule ps
     JOIN schedules s ON s.id = ps.schedule_id
     JOIN users d ON d.id = s.doctor_id
     JOIN patients p ON p.id = ps.patient_id
     WHERE ps.is_deleted = FALSE";

pub struct ScheduleService {
    db: PgPool,
}

impl ScheduleService {
    pub fn new(db: &PgPool) -> Self {
        Self { db: db.clone() }
    }

    /// A doctor's upcoming schedules with their Accept/Done bookings.
    pub async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<ScheduleWithBookings>, AppError> {
        let today = vietnam_today_start();

        let schedules = sqlx::query_as::<_, Schedule>(
            "SELECT id, doctor_id, start_time, end_time, price, max_booking, sum_booking
             FROM schedules
             WHERE doctor_id = $1 AND start_time >= $2 AND is_deleted = FALSE
             ORDER BY start_time",
        )
        .bind(doctor_id)
        .bind(today)
        .fetch_all(&self.db)
        .await?;

        self.attach_bookings(schedules, false).await
    }

    /// All of a doctor's schedules that have at least one Accept/Done booking.
    pub async fn list_accepted_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<ScheduleWithBookings>, AppError> {
        let schedules = sqlx::query_as::<_, Schedule>(
            "SELECT id, doctor_id, start_time, end_time, price, max_booking, sum_booking
             FROM schedules
             WHERE doctor_id = $1 AND is_deleted = FALSE
             ORDER BY start_time",
        )
        .bind(doctor_id)
        .fetch_all(&self.db)
        .await?;

        self.attach_bookings(schedules, true).await
    }

    async fn attach_bookings(
        &self,
        schedules: Vec<Schedule>,
        drop_empty: bool,
    ) -> Result<Vec<ScheduleWithBookings>, AppError> {
        let ids: Vec<Uuid> = schedules.iter().map(|s| s.id).collect();

        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "{} AND ps.schedule_id = ANY($1) AND ps.status IN ('Accept', 'Done')",
            BOOKING_SELECT
        ))
        .bind(&ids)
        .fetch_all(&self.db)
        .await?;

        let mut by_schedule: HashMap<Uuid, Vec<BookingEntry>> = HashMap::new();
        for row in rows {
            let entry = BookingEntry {
                status: row.status,
                patient: row.patient(),
            };
            by_schedule.entry(row.schedule_id).or_default().push(entry);
        }

        let result = schedules
            .into_iter()
            .map(|s| {
                let bookings = by_schedule.remove(&s.id).unwrap_or_default();
                ScheduleWithBookings {
                    id: s.id,
                    start_time: s.start_time,
                    end_time: s.end_time,
                    price: s.price,
                    max_booking: s.max_booking,
                    bookings,
                }
            })
            .filter(|s| !drop_empty || !s.bookings.is_empty())
            .collect();

        Ok(result)
    }

    /// Public listing: a doctor's upcoming schedules that still have free
    /// capacity.
    pub async fn list_available(&self, doctor_id: Uuid) -> Result<Vec<Schedule>, AppError> {
        let today = vietnam_today_start();

        let schedules = sqlx::query_as::<_, Schedule>(
            "SELECT id, doctor_id, start_time, end_time, price, max_booking, sum_booking
             FROM schedules
             WHERE doctor_id = $1 AND start_time >= $2
               AND sum_booking < max_booking AND is_deleted = FALSE
             ORDER BY start_time",
        )
        .bind(doctor_id)
        .bind(today)
        .fetch_all(&self.db)
        .await?;

        Ok(schedules)
    }

    pub async fn create(
        &self,
        doctor_id: Uuid,
        dto: CreateScheduleDto,
    ) -> Result<Schedule, AppError> {
        validate_range(dto.start_time, dto.end_time, vietnam_today_start())?;

        if dto.max_booking <= 0 {
            return Err(AppError::ValidationError(
                "maxBooking must be at least 1".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        self.check_overlap(&mut tx, doctor_id, None, dto.start_time, dto.end_time)
            .await?;

        let schedule = sqlx::query_as::<_, Schedule>(
            "INSERT INTO schedules (doctor_id, start_time, end_time, price, max_booking, sum_booking)
             VALUES ($1, $2, $3, $4, $5, 0)
             RETURNING id, doctor_id, start_time, end_time, price, max_booking, sum_booking",
        )
        .bind(doctor_id)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(dto.price)
        .bind(dto.max_booking)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Doctor {} created schedule {}", doctor_id, schedule.id);

        Ok(schedule)
    }

    pub async fn update(
        &self,
        doctor_id: Uuid,
        dto: UpdateScheduleDto,
    ) -> Result<Schedule, AppError> {
        validate_range(dto.start_time, dto.end_time, vietnam_today_start())?;

        if dto.max_booking <= 0 {
            return Err(AppError::ValidationError(
                "maxBooking must be at least 1".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let owned: Option<i32> = sqlx::query_scalar(
            "SELECT sum_booking FROM schedules
             WHERE id = $1 AND doctor_id = $2 AND is_deleted = FALSE",
        )
        .bind(dto.id)
        .bind(doctor_id)
        .fetch_optional(&mut *tx)
        .await?;

        let sum_booking =
            owned.ok_or_else(|| AppError::NotFound("Schedule not found".to_string()))?;

        if dto.max_booking < sum_booking {
            return Err(AppError::ValidationError(
                "maxBooking cannot be lower than the current booking count".to_string(),
            ));
        }

        self.check_overlap(&mut tx, doctor_id, Some(dto.id), dto.start_time, dto.end_time)
            .await?;

        let schedule = sqlx::query_as::<_, Schedule>(
            "UPDATE schedules
             SET start_time = $3, end_time = $4, price = $5, max_booking = $6,
                 updated_at = now() AT TIME ZONE 'utc'
             WHERE id = $1 AND doctor_id = $2
             RETURNING id, doctor_id, start_time, end_time, price, max_booking, sum_booking",
        )
        .bind(dto.id)
        .bind(doctor_id)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(dto.price)
        .bind(dto.max_booking)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(schedule)
    }

    async fn check_overlap(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        doctor_id: Uuid,
        exclude: Option<Uuid>,
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    ) -> Result<(), AppError> {
        let overlapping: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM schedules
             WHERE doctor_id = $1 AND is_deleted = FALSE
               AND ($2::uuid IS NULL OR id <> $2)
               AND start_time <= $4 AND end_time >= $3",
        )
        .bind(doctor_id)
        .bind(exclude)
        .bind(start)
        .bind(end)
        .fetch_one(&mut **tx)
        .await?;

        if overlapping > 0 {
            return Err(AppError::BadRequest(
                "Schedule overlaps with another schedule".to_string(),
            ));
        }
        Ok(())
    }

    /// Removes a doctor's schedule along with its bookings.
    pub async fn delete(&self, doctor_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        let owned: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM schedules WHERE id = $1 AND doctor_id = $2",
        )
        .bind(id)
        .bind(doctor_id)
        .fetch_optional(&mut *tx)
        .await?;

        if owned.is_none() {
            return Err(AppError::NotFound("Schedule not found".to_string()));
        }

        sqlx::query("DELETE FROM patient_schedule WHERE schedule_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("Doctor {} deleted schedule {}", doctor_id, id);

        Ok(())
    }
}
