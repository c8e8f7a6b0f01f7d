use serde::Serialize;
use sqlx::PgPool;

use shared_models::error::AppError;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub supporters: i64,
    pub doctors: i64,
    pub bookings: i64,
    pub specialties: i64,
}

pub struct DashboardService {
    db: PgPool,
}

impl DashboardService {
    pub fn new(db: &PgPool) -> Self {
        Self { db: db.clone() }
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let supporters: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE role_id = 3 AND is_deleted = FALSE",
        )
        .fetch_one(&self.db)
        .await?;

        let doctors: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE role_id = 2 AND is_deleted = FALSE",
        )
        .fetch_one(&self.db)
        .await?;

        let bookings: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM patient_schedule WHERE is_deleted = FALSE",
        )
        .fetch_one(&self.db)
        .await?;

        let specialties: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM specializations WHERE is_deleted = FALSE",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(DashboardStats {
            supporters,
            doctors,
            bookings,
            specialties,
        })
    }
}
