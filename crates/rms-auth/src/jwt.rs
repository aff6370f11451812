//! JWT minting and verification.
//!
//! Tokens are HS256-signed with the single secret from [`JwtConfig`]. Verification
//! pins the algorithm to HS256, so a token whose header names any other
//! algorithm is rejected even when its signature would check out under that
//! algorithm. Expiry is enforced with no leeway.
//!
//! Every decode failure (malformed, bad signature, wrong algorithm, expired,
//! unknown role) collapses to [`TokenError::Invalid`].

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use rms_config::JwtConfig;
use rms_core::AppError;

use crate::claims::Claims;
use crate::role::Role;

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("failed to create token: {0}")]
    Encoding(jsonwebtoken::errors::Error),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => AppError::invalid_token(),
            TokenError::Encoding(e) => AppError::internal_error(format!("Failed to create token: {}", e)),
        }
    }
}

/// Mints an access token for a freshly created session, valid for
/// `jwt_config.access_token_expiry` seconds.
pub fn create_access_token(
    user_id: Uuid,
    role: Role,
    session_id: Uuid,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    create_token_with_ttl(
        user_id,
        role,
        session_id,
        Duration::seconds(jwt_config.access_token_expiry),
        jwt_config,
    )
}

pub fn create_token_with_ttl(
    user_id: Uuid,
    role: Role,
    session_id: Uuid,
    ttl: Duration,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = Utc::now();

    let claims = Claims {
        user_id,
        role,
        session_id,
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(TokenError::Encoding)
}

/// Checks signature, algorithm and expiry, and returns the embedded claims.
///
/// A successful verification does not mean the session is still alive.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| TokenError::Invalid)
}
