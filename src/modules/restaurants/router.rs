use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    admin_create_restaurant, admin_get_restaurants, sub_admin_create_restaurant,
    sub_admin_get_restaurants, user_get_restaurants,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/create-restaurant", post(admin_create_restaurant))
        .route("/get-restaurants", get(admin_get_restaurants))
}

pub fn sub_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/create-restaurant", post(sub_admin_create_restaurant))
        .route("/get-restaurants", get(sub_admin_get_restaurants))
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/get-restaurants", get(user_get_restaurants))
}
