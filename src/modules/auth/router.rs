use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

use super::controller::{check, info, login, logout, signup};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/info", get(info))
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/check", get(check))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .merge(authenticated)
}
