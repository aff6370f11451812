//! Session liveness as seen by the authentication middleware.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::ids::UserId;

/// The owner of a session, joined with both archival timestamps.
///
/// A session is dead once its own `archived_at` is set, and also once the
/// owning credential has been archived.
#[derive(Debug, Clone, FromRow)]
pub struct SessionOwner {
    pub user_id: UserId,
    pub email: String,
    pub archived_at: Option<DateTime<Utc>>,
    pub owner_archived_at: Option<DateTime<Utc>>,
}

impl SessionOwner {
    pub fn is_alive(&self) -> bool {
        self.archived_at.is_none() && self.owner_archived_at.is_none()
    }
}
