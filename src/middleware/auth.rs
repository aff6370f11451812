use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use rms_auth::{Role, verify_token};
use rms_core::AppError;
use rms_models::{SessionId, UserId};
use tracing::{debug, warn};

use crate::modules::auth::session::SessionService;
use crate::state::AppState;

/// Who is making the current request. Built once per request by
/// [`authenticate`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub role: Role,
    pub email: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let Authorization(bearer) = headers.typed_get::<Authorization<Bearer>>()?;
    let token = bearer.token().trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Runs the full authentication gate against the request headers.
///
/// Each step short-circuits; every rejection is the same 401 body so a caller
/// cannot tell a forged token from an expired one or a revoked session.
pub async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<RequestIdentity, AppError> {
    let token = bearer_token(headers).ok_or_else(|| {
        debug!("Missing or malformed bearer token");
        AppError::invalid_token()
    })?;

    let claims = verify_token(&token, &state.jwt_config).inspect_err(|_| {
        debug!("Bearer token failed verification");
    })?;

    let session_id = SessionId::from(claims.session_id);
    let user_id = UserId::from(claims.user_id);

    let owner = SessionService::fetch_owner(&state.db, session_id)
        .await?
        .ok_or_else(|| {
            // Signed by us but pointing at a session we have no record of.
            warn!(session_id = %session_id, user_id = %user_id, "Token references unknown session");
            AppError::invalid_token()
        })?;

    if owner.user_id != user_id {
        warn!(session_id = %session_id, user_id = %user_id, "Token user does not own session");
        return Err(AppError::invalid_token());
    }

    if !owner.is_alive() {
        debug!(session_id = %session_id, "Session has been revoked");
        return Err(AppError::invalid_token());
    }

    Ok(RequestIdentity {
        user_id,
        session_id,
        role: claims.role,
        email: owner.email,
    })
}

/// Authentication gate for routes open to any role.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = authenticate(req.headers(), &state).await?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Extractor for the current [`RequestIdentity`].
///
/// Behind one of the gate layers this is a lookup in the request extensions;
/// elsewhere it runs the gate itself.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestIdentity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<RequestIdentity>() {
            return Ok(AuthUser(identity.clone()));
        }

        let identity = authenticate(&parts.headers, state).await?;
        parts.extensions.insert(identity.clone());
        Ok(AuthUser(identity))
    }
}
