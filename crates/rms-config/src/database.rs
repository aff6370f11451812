//! PostgreSQL connection settings.
//!
//! `DATABASE_URL` is read first, `DB_URL` is accepted as a fallback.

use std::env;
use std::fmt;

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Neither `DATABASE_URL` nor `DB_URL` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingDatabaseUrl;

impl fmt::Display for MissingDatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DATABASE_URL must be set")
    }
}

impl std::error::Error for MissingDatabaseUrl {}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, MissingDatabaseUrl> {
        let url = env::var("DATABASE_URL")
            .or_else(|_| env::var("DB_URL"))
            .map_err(|_| MissingDatabaseUrl)?;

        Ok(Self {
            url,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        })
    }
}

// The URL carries the database password.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
