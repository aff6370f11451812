use axum::{Json, extract::State, http::StatusCode};
use rms_core::AppError;
use rms_models::{CreateRestaurantDto, Restaurant, RestaurantWithDishes};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::RestaurantService;

/// Create a restaurant
#[utoipa::path(
    post,
    path = "/v1/admin/create-restaurant",
    request_body = CreateRestaurantDto,
    responses(
        (status = 201, description = "Restaurant created", body = Restaurant),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Same name and address already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip_all, fields(caller = %auth.0.user_id))]
pub async fn admin_create_restaurant(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateRestaurantDto>,
) -> Result<(StatusCode, Json<Restaurant>), AppError> {
    let restaurant = RestaurantService::create(&state.db, dto, auth.0.user_id).await?;
    Ok((StatusCode::CREATED, Json(restaurant)))
}

/// List all restaurants with their dishes
#[utoipa::path(
    get,
    path = "/v1/admin/get-restaurants",
    responses(
        (status = 200, description = "Live restaurants", body = Vec<RestaurantWithDishes>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip_all)]
pub async fn admin_get_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantWithDishes>>, AppError> {
    let restaurants = RestaurantService::list_with_dishes(&state.db, None).await?;
    Ok(Json(restaurants))
}

/// Create a restaurant
#[utoipa::path(
    post,
    path = "/v1/sub-admin/create-restaurant",
    request_body = CreateRestaurantDto,
    responses(
        (status = 201, description = "Restaurant created", body = Restaurant),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a sub-admin", body = ErrorResponse),
        (status = 409, description = "Same name and address already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sub-admin"
)]
#[instrument(skip_all, fields(caller = %auth.0.user_id))]
pub async fn sub_admin_create_restaurant(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateRestaurantDto>,
) -> Result<(StatusCode, Json<Restaurant>), AppError> {
    let restaurant = RestaurantService::create(&state.db, dto, auth.0.user_id).await?;
    Ok((StatusCode::CREATED, Json(restaurant)))
}

/// List the caller's restaurants with their dishes
#[utoipa::path(
    get,
    path = "/v1/sub-admin/get-restaurants",
    responses(
        (status = 200, description = "Restaurants created by the caller", body = Vec<RestaurantWithDishes>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a sub-admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sub-admin"
)]
#[instrument(skip_all, fields(caller = %auth.0.user_id))]
pub async fn sub_admin_get_restaurants(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<RestaurantWithDishes>>, AppError> {
    let restaurants = RestaurantService::list_with_dishes(&state.db, Some(auth.0.user_id)).await?;
    Ok(Json(restaurants))
}

/// List all restaurants with their dishes
#[utoipa::path(
    get,
    path = "/v1/user/get-restaurants",
    responses(
        (status = 200, description = "Live restaurants", body = Vec<RestaurantWithDishes>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a user", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
#[instrument(skip_all)]
pub async fn user_get_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantWithDishes>>, AppError> {
    let restaurants = RestaurantService::list_with_dishes(&state.db, None).await?;
    Ok(Json(restaurants))
}
