//! # RMS DB
//!
//! Database pool and transaction utilities for the RMS API.
//!
//! - [`init_db_pool`]: builds the shared PostgreSQL pool
//! - [`transaction`]: the single entry point for multi-statement writes
//!
//! # Example
//!
//! ```ignore
//! use rms_config::DatabaseConfig;
//! use rms_db::init_db_pool;
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! sqlx::migrate!("./migrations").run(&pool).await?;
//! ```

pub mod transaction;

use rms_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

/// Initializes a PostgreSQL connection pool.
///
/// The pool is cheaply cloneable and is handed to the application state once at
/// startup; nothing else in the process holds a connection.
///
/// # Errors
///
/// Returns the driver error if the first connection cannot be established.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

// Re-export for convenience
pub use sqlx::PgPool;
pub use transaction::{Tx, with_transaction};
