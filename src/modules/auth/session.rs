//! Session store.
//!
//! One row per successful login. Revocation only ever sets `archived_at`, and
//! only when it is still null, so a revoked session stays revoked.

use anyhow::Context;
use rms_core::AppError;
use rms_models::{SessionId, SessionOwner, UserId};
use sqlx::PgPool;
use tracing::instrument;

pub struct SessionService;

impl SessionService {
    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, user_id: UserId) -> Result<SessionId, AppError> {
        let session_id = SessionId::new();

        sqlx::query("INSERT INTO user_session (id, user_id) VALUES ($1, $2)")
            .bind(session_id)
            .bind(user_id)
            .execute(db)
            .await
            .context("Failed to create user session")?;

        Ok(session_id)
    }

    /// `None` when no session with this id was ever created.
    #[instrument(skip(db))]
    pub async fn fetch_owner(
        db: &PgPool,
        session_id: SessionId,
    ) -> Result<Option<SessionOwner>, AppError> {
        let owner = sqlx::query_as::<_, SessionOwner>(
            r#"
            SELECT u.id AS user_id, u.email, s.archived_at, u.archived_at AS owner_archived_at
            FROM user_session s
            INNER JOIN users u ON u.id = s.user_id
            WHERE s.id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch session owner")?;

        Ok(owner)
    }

    /// Idempotent: revoking an already revoked session is a no-op.
    #[instrument(skip(db))]
    pub async fn revoke(db: &PgPool, session_id: SessionId) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE user_session SET archived_at = NOW() WHERE id = $1 AND archived_at IS NULL",
        )
        .bind(session_id)
        .execute(db)
        .await
        .context("Failed to revoke user session")?;

        if result.rows_affected() == 0 {
            tracing::debug!(session_id = %session_id, "Session was already revoked");
        }

        Ok(())
    }
}
