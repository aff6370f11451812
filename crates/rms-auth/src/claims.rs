//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

/// Claims embedded in every access token.
///
/// Serialized as `{"userId", "role", "sessionId", "exp", "iat"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub role: Role,
    /// Server-side session this token was minted for
    pub session_id: Uuid,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
}
