//! # RMS Config
//!
//! Configuration types for the RMS API, loaded from environment variables.
//!
//! - [`jwt`]: Token signing secret and lifetime
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: Listen address
//!
//! # Example
//!
//! ```ignore
//! use rms_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let database_config = DatabaseConfig::from_env()?;
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::{DatabaseConfig, MissingDatabaseUrl};
pub use jwt::JwtConfig;
pub use server::ServerConfig;
