use anyhow::Context;
use rms_config::{CorsConfig, DatabaseConfig, JwtConfig};
use rms_db::{PgPool, init_db_pool};

/// Everything a handler or middleware needs, injected through axum's `State`.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Builds state around an existing pool, reading the rest from the environment.
    pub fn from_pool(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_config = DatabaseConfig::from_env()?;
    let db = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;

    Ok(AppState::from_pool(db))
}
