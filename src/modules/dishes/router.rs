use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    admin_create_dish, admin_get_all_dishes, sub_admin_create_dish, sub_admin_get_all_dishes,
    user_get_all_dishes, user_get_distance, user_get_restaurant_dishes,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/{restaurantId}/create-dish", post(admin_create_dish))
        .route("/get-all-dishes", get(admin_get_all_dishes))
}

pub fn sub_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/{restaurantId}/create-dish", post(sub_admin_create_dish))
        .route("/get-all-dishes", get(sub_admin_get_all_dishes))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/get-all-dishes", get(user_get_all_dishes))
        .route("/{restaurantId}/dishes", get(user_get_restaurant_dishes))
        .route("/{restaurantId}/distance", get(user_get_distance))
}
