use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{CreateSpecialtyDto, Specialty, UpdateSpecialtyDto};

pub struct SpecialtyService {
    db: PgPool,
}

impl SpecialtyService {
    pub fn new(db: &PgPool) -> Self {
        Self { db: db.clone() }
    }

    pub async fn list(&self) -> Result<Vec<Specialty>, AppError> {
        let specialties = sqlx::query_as::<_, Specialty>(
            "SELECT id, name, description, image
             FROM specializations WHERE is_deleted = FALSE ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(specialties)
    }

    pub async fn create(&self, dto: CreateSpecialtyDto) -> Result<Specialty, AppError> {
        debug!("Creating specialization: {}", dto.name);

        let specialty = sqlx::query_as::<_, Specialty>(
            "INSERT INTO specializations (name, description, image)
             VALUES ($1, $2, $3)
             RETURNING id, name, description, image",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.image)
        .fetch_one(&self.db)
        .await?;

        Ok(specialty)
    }

    pub async fn update(&self, id: Uuid, dto: UpdateSpecialtyDto) -> Result<Specialty, AppError> {
        let existing = sqlx::query_as::<_, Specialty>(
            "SELECT id, name, description, image FROM specializations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Specialization not found".to_string()))?;

        let specialty = sqlx::query_as::<_, Specialty>(
            "UPDATE specializations
             SET name = $2, description = $3, image = $4,
                 updated_at = now() AT TIME ZONE 'utc'
             WHERE id = $1
             RETURNING id, name, description, image",
        )
        .bind(id)
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.description.or(existing.description))
        .bind(dto.image.or(existing.image))
        .fetch_one(&self.db)
        .await?;

        Ok(specialty)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        // Refuse while rows in doctor_user still reference it
        let assigned: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM doctor_user WHERE specialization_id = $1",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        if assigned > 0 {
            return Err(AppError::BadRequest(
                "Specialization is still assigned to doctors, remove them first".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM specializations WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Specialization not found".to_string()));
        }

        debug!("Deleted specialization {}", id);
        Ok(())
    }
}
