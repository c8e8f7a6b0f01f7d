use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use shared_config::AppConfig;
use shared_email::Mailer;

/// Shared application state handed to every cell router.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: PgPool,
    pub mailer: Mailer,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, db: PgPool) -> Self {
        let mailer = Mailer::new(&config);
        Self { config, db, mailer }
    }
}

/// Open the connection pool and bring the schema up to date.
pub async fn connect(config: &AppConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database connected, migrations applied");

    Ok(pool)
}
