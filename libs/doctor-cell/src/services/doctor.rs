use sqlx::PgPool;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{DoctorProfile, DoctorRow};

const DOCTOR_SELECT: &str = "SELECT u.id, u.name, u.email, u.phone, u.gender, u.address,
        u.avatar, u.description,
        c.name AS clinic_name, c.address AS clinic_address,
        c.description AS clinic_description, c.image AS clinic_image,
        s.name AS specialization_name, s.description AS specialization_description
     FROM users u
     JOIN doctor_user du ON du.doctor_id = u.id AND du.is_deleted = FALSE
     JOIN clinics c ON c.id = du.clinic_id
     JOIN specializations s ON s.id = du.specialization_id
     WHERE u.role_id = 2 AND u.is_deleted = FALSE";

pub struct DoctorService {
    db: PgPool,
}

impl DoctorService {
    pub fn new(db: &PgPool) -> Self {
        Self { db: db.clone() }
    }

    pub async fn list_all(&self) -> Result<Vec<DoctorProfile>, AppError> {
        let rows = sqlx::query_as::<_, DoctorRow>(&format!("{} ORDER BY u.name", DOCTOR_SELECT))
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(DoctorProfile::from).collect())
    }

    pub async fn list_by_specialization(&self, id: Uuid) -> Result<Vec<DoctorProfile>, AppError> {
        let rows = sqlx::query_as::<_, DoctorRow>(&format!(
            "{} AND du.specialization_id = $1 ORDER BY u.name",
            DOCTOR_SELECT
        ))
        .bind(id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(DoctorProfile::from).collect())
    }

    pub async fn list_by_clinic(&self, id: Uuid) -> Result<Vec<DoctorProfile>, AppError> {
        let rows = sqlx::query_as::<_, DoctorRow>(&format!(
            "{} AND du.clinic_id = $1 ORDER BY u.name",
            DOCTOR_SELECT
        ))
        .bind(id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(DoctorProfile::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<DoctorProfile, AppError> {
        let row = sqlx::query_as::<_, DoctorRow>(&format!("{} AND u.id = $1", DOCTOR_SELECT))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

        Ok(DoctorProfile::from(row))
    }
}
