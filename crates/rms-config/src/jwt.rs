//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET_KEY`: HMAC signing secret (`JWT_SECRET` is accepted as a fallback)
//! - `JWT_ACCESS_EXPIRY`: token lifetime in seconds (default: 7200, two hours)

use std::env;
use std::fmt;

const DEV_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET_KEY")
            .or_else(|_| env::var("JWT_SECRET"))
            .unwrap_or_else(|_| {
                tracing::warn!("JWT_SECRET_KEY is not set, falling back to the development secret");
                DEV_SECRET.to_string()
            });

        Self {
            secret,
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7200), // 2 hours
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}
