use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use shared_models::domain::Role;
use shared_models::error::AppError;
use shared_utils::password::hash_password;

use crate::models::{RegisterUserDto, UpdateUserDto, UserListing, UserRow};

pub struct UserService {
    db: PgPool,
}

impl UserService {
    pub fn new(db: &PgPool) -> Self {
        Self { db: db.clone() }
    }

    pub async fn list(&self) -> Result<Vec<UserListing>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.name, u.email, u.phone, u.gender, u.role_id,
                    u.description, u.address, u.avatar, u.created_at, u.updated_at,
                    du.clinic_id, c.name AS clinic_name,
                    du.specialization_id, s.name AS specialization_name
             FROM users u
             LEFT JOIN doctor_user du ON du.doctor_id = u.id AND du.is_deleted = FALSE
             LEFT JOIN clinics c ON c.id = du.clinic_id
             LEFT JOIN specializations s ON s.id = du.specialization_id
             WHERE u.is_deleted = FALSE
             ORDER BY u.created_at",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(UserListing::from).collect())
    }

    pub async fn create(&self, dto: RegisterUserDto) -> Result<Uuid, AppError> {
        let email = dto.email.trim().to_lowercase();

        if Role::from_id(dto.role_id).is_none() {
            return Err(AppError::ValidationError("Unknown role".to_string()));
        }

        let mut tx = self.db.begin().await?;

        let exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
                .bind(&email)
                .fetch_optional(&mut *tx)
                .await?;

        if exists.is_some() {
            return Err(AppError::Conflict(format!(
                "Email {} is already registered",
                email
            )));
        }

        let password_hash = hash_password(&dto.password)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let user_id: Uuid = sqlx::query_scalar(
            "INSERT INTO users (email, password, name, phone, gender, address,
                                role_id, avatar, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id",
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(&dto.name)
        .bind(&dto.phone)
        .bind(dto.gender)
        .bind(&dto.address)
        .bind(dto.role_id)
        .bind(&dto.avatar)
        .bind(&dto.description)
        .fetch_one(&mut *tx)
        .await?;

        if dto.role_id == Role::Doctor as i32 {
            if let (Some(clinic_id), Some(specialty_id)) = (dto.clinic_id, dto.specialty_id) {
                sqlx::query(
                    "INSERT INTO doctor_user (doctor_id, clinic_id, specialization_id)
                     VALUES ($1, $2, $3)",
                )
                .bind(user_id)
                .bind(clinic_id)
                .bind(specialty_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        debug!("Created user {} ({})", user_id, email);

        Ok(user_id)
    }

    pub async fn update(&self, dto: UpdateUserDto) -> Result<(), AppError> {
        let email = dto.email.trim().to_lowercase();

        if Role::from_id(dto.role_id).is_none() {
            return Err(AppError::ValidationError("Unknown role".to_string()));
        }

        let mut tx = self.db.begin().await?;

        let existing_role: Option<i32> =
            sqlx::query_scalar("SELECT role_id FROM users WHERE id = $1 AND is_deleted = FALSE")
                .bind(dto.id)
                .fetch_optional(&mut *tx)
                .await?;

        let existing_role =
            existing_role.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let email_taken: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE email = $1 AND id <> $2")
                .bind(&email)
                .bind(dto.id)
                .fetch_optional(&mut *tx)
                .await?;

        if email_taken.is_some() {
            return Err(AppError::Conflict(format!(
                "Email {} is already registered",
                email
            )));
        }

        self.reconcile_assignment(&mut tx, &dto, existing_role).await?;

        sqlx::query(
            "UPDATE users
             SET email = $2, name = $3, phone = $4, gender = $5, address = $6,
                 role_id = $7, description = $8, updated_at = now() AT TIME ZONE 'utc'
             WHERE id = $1",
        )
        .bind(dto.id)
        .bind(&email)
        .bind(&dto.name)
        .bind(&dto.phone)
        .bind(dto.gender)
        .bind(&dto.address)
        .bind(dto.role_id)
        .bind(&dto.description)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Keeps the doctor_user row in step with role changes: dropped when the
    /// account stops being a doctor, upserted when it is one with an
    /// assignment.
    async fn reconcile_assignment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        dto: &UpdateUserDto,
        existing_role: i32,
    ) -> Result<(), AppError> {
        let doctor = Role::Doctor as i32;

        if existing_role == doctor && dto.role_id != doctor {
            sqlx::query("DELETE FROM doctor_user WHERE doctor_id = $1")
                .bind(dto.id)
                .execute(&mut **tx)
                .await?;
            return Ok(());
        }

        if dto.role_id == doctor {
            if let (Some(clinic_id), Some(specialty_id)) = (dto.clinic_id, dto.specialty_id) {
                sqlx::query(
                    "INSERT INTO doctor_user (doctor_id, clinic_id, specialization_id)
                     VALUES ($1, $2, $3)
                     ON CONFLICT (doctor_id, clinic_id, specialization_id) DO NOTHING",
                )
                .bind(dto.id)
                .bind(clinic_id)
                .bind(specialty_id)
                .execute(&mut **tx)
                .await?;

                sqlx::query(
                    "DELETE FROM doctor_user
                     WHERE doctor_id = $1 AND (clinic_id <> $2 OR specialization_id <> $3)",
                )
                .bind(dto.id)
                .bind(clinic_id)
                .bind(specialty_id)
                .execute(&mut **tx)
                .await?;
            }
        }

        Ok(())
    }

    /// Removes an account. For doctors the schedules, their bookings and the
    /// clinic assignment go too, in one transaction.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        let role_id: Option<i32> =
            sqlx::query_scalar("SELECT role_id FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let role_id = role_id.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if role_id == Role::Doctor as i32 {
            sqlx::query(
                "DELETE FROM patient_schedule
                 WHERE schedule_id IN (SELECT id FROM schedules WHERE doctor_id = $1)",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;

            sqlx::query("DELETE FROM schedules WHERE doctor_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            sqlx::query("DELETE FROM doctor_user WHERE doctor_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("Deleted user {}", id);

        Ok(())
    }

    pub async fn set_avatar(&self, id: Uuid, file_name: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET avatar = $2, updated_at = now() AT TIME ZONE 'utc' WHERE id = $1",
        )
        .bind(id)
        .bind(file_name)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}
