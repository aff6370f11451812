use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    admin_create_user, admin_get_users, create_sub_admin, get_sub_admins, sub_admin_create_user,
    sub_admin_get_users,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/create-sub-admin", post(create_sub_admin))
        .route("/get-sub-admins", get(get_sub_admins))
        .route("/create-user", post(admin_create_user))
        .route("/get-users", get(admin_get_users))
}

pub fn sub_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/create-user", post(sub_admin_create_user))
        .route("/get-users", get(sub_admin_get_users))
}
