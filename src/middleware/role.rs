//! Role gate for route groups.
//!
//! Roles are compared by exact equality. An admin token on a `/user` route is
//! rejected just like a user token on an `/admin` route.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use rms_auth::Role;
use rms_core::AppError;

use crate::middleware::auth::{RequestIdentity, authenticate};
use crate::state::AppState;

/// Deliberately silent about which role the route wanted.
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to access this resource";

pub fn check_role(identity: &RequestIdentity, required: Role) -> Result<(), AppError> {
    if identity.role == required {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %identity.user_id,
            role = %identity.role,
            required = %required,
            "Role check failed"
        );
        Err(AppError::forbidden(FORBIDDEN_MESSAGE.to_string()))
    }
}

/// Authenticates, checks the role, then hands the request on with the
/// identity attached. The wrapped handler never runs on a mismatch.
pub async fn require_role(
    state: &AppState,
    mut req: Request,
    next: Next,
    required: Role,
) -> Result<Response, AppError> {
    let identity = authenticate(req.headers(), state).await?;
    check_role(&identity, required)?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_role(&state, req, next, Role::Admin)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_sub_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    require_role(&state, req, next, Role::SubAdmin)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_user(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_role(&state, req, next, Role::User)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}
