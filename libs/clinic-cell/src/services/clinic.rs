use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{Clinic, CreateClinicDto, UpdateClinicDto};

pub struct ClinicService {
    db: PgPool,
}

impl ClinicService {
    pub fn new(db: &PgPool) -> Self {
        Self { db: db.clone() }
    }

    pub async fn list(&self) -> Result<Vec<Clinic>, AppError> {
        let clinics = sqlx::query_as::<_, Clinic>(
            "SELECT id, name, address, phone, description, image
             FROM clinics WHERE is_deleted = FALSE ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(clinics)
    }

    pub async fn create(&self, dto: CreateClinicDto) -> Result<Clinic, AppError> {
        debug!("Creating clinic: {}", dto.name);

        let clinic = sqlx::query_as::<_, Clinic>(
            "INSERT INTO clinics (name, address, phone, description, image)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, address, phone, description, image",
        )
        .bind(&dto.name)
        .bind(&dto.address)
        .bind(&dto.phone)
        .bind(&dto.description)
        .bind(&dto.image)
        .fetch_one(&self.db)
        .await?;

        Ok(clinic)
    }

    pub async fn update(&self, id: Uuid, dto: UpdateClinicDto) -> Result<Clinic, AppError> {
        let existing = sqlx::query_as::<_, Clinic>(
            "SELECT id, name, address, phone, description, image FROM clinics WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Clinic not found".to_string()))?;

        let clinic = sqlx::query_as::<_, Clinic>(
            "UPDATE clinics
             SET name = $2, address = $3, phone = $4, description = $5, image = $6,
                 updated_at = now() AT TIME ZONE 'utc'
             WHERE id = $1
             RETURNING id, name, address, phone, description, image",
        )
        .bind(id)
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.address.unwrap_or(existing.address))
        .bind(dto.phone.unwrap_or(existing.phone))
        .bind(dto.description.or(existing.description))
        .bind(dto.image.or(existing.image))
        .fetch_one(&self.db)
        .await?;

        Ok(clinic)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        // Refuse while doctors are still assigned here
        let assigned: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM doctor_user WHERE clinic_id = $1",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        if assigned > 0 {
            return Err(AppError::BadRequest(
                "Clinic still has doctors assigned, remove them first".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM clinics WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Clinic not found".to_string()));
        }

        debug!("Deleted clinic {}", id);
        Ok(())
    }
}
