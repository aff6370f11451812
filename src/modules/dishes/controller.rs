use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use rms_core::AppError;
use rms_models::{CreateDishDto, Dish, DishListing, RestaurantDistances, RestaurantId};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidPath, ValidatedJson};

use super::service::DishService;

/// Add a dish to any restaurant
#[utoipa::path(
    post,
    path = "/v1/admin/{restaurantId}/create-dish",
    params(("restaurantId" = RestaurantId, Path, description = "Restaurant id")),
    request_body = CreateDishDto,
    responses(
        (status = 201, description = "Dish created", body = Dish),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 409, description = "Dish name already used in this restaurant", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn admin_create_dish(
    State(state): State<AppState>,
    ValidPath(restaurant_id): ValidPath<RestaurantId>,
    ValidatedJson(dto): ValidatedJson<CreateDishDto>,
) -> Result<(StatusCode, Json<Dish>), AppError> {
    let dish = DishService::create(&state.db, restaurant_id, dto, None).await?;
    Ok((StatusCode::CREATED, Json(dish)))
}

/// List every dish
#[utoipa::path(
    get,
    path = "/v1/admin/get-all-dishes",
    responses(
        (status = 200, description = "Live dishes with restaurant names", body = Vec<DishListing>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip_all)]
pub async fn admin_get_all_dishes(
    State(state): State<AppState>,
) -> Result<Json<Vec<DishListing>>, AppError> {
    let dishes = DishService::list(&state.db, None).await?;
    Ok(Json(dishes))
}

/// Add a dish to one of the caller's restaurants
#[utoipa::path(
    post,
    path = "/v1/sub-admin/{restaurantId}/create-dish",
    params(("restaurantId" = RestaurantId, Path, description = "Restaurant id")),
    request_body = CreateDishDto,
    responses(
        (status = 201, description = "Dish created", body = Dish),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a sub-admin or does not own the restaurant", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 409, description = "Dish name already used in this restaurant", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sub-admin"
)]
#[instrument(skip(state, auth, dto), fields(caller = %auth.0.user_id))]
pub async fn sub_admin_create_dish(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(restaurant_id): ValidPath<RestaurantId>,
    ValidatedJson(dto): ValidatedJson<CreateDishDto>,
) -> Result<(StatusCode, Json<Dish>), AppError> {
    let dish = DishService::create(&state.db, restaurant_id, dto, Some(auth.0.user_id)).await?;
    Ok((StatusCode::CREATED, Json(dish)))
}

/// List the dishes of the caller's restaurants
#[utoipa::path(
    get,
    path = "/v1/sub-admin/get-all-dishes",
    responses(
        (status = 200, description = "Dishes of restaurants created by the caller", body = Vec<DishListing>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a sub-admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sub-admin"
)]
#[instrument(skip_all, fields(caller = %auth.0.user_id))]
pub async fn sub_admin_get_all_dishes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<DishListing>>, AppError> {
    let dishes = DishService::list(&state.db, Some(auth.0.user_id)).await?;
    Ok(Json(dishes))
}

/// List every dish
#[utoipa::path(
    get,
    path = "/v1/user/get-all-dishes",
    responses(
        (status = 200, description = "Live dishes with restaurant names", body = Vec<DishListing>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a user", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
#[instrument(skip_all)]
pub async fn user_get_all_dishes(
    State(state): State<AppState>,
) -> Result<Json<Vec<DishListing>>, AppError> {
    let dishes = DishService::list(&state.db, None).await?;
    Ok(Json(dishes))
}

/// List the dishes of one restaurant
#[utoipa::path(
    get,
    path = "/v1/user/{restaurantId}/dishes",
    params(("restaurantId" = RestaurantId, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Live dishes of the restaurant", body = Vec<Dish>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a user", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
#[instrument(skip(state))]
pub async fn user_get_restaurant_dishes(
    State(state): State<AppState>,
    ValidPath(restaurant_id): ValidPath<RestaurantId>,
) -> Result<Json<Vec<Dish>>, AppError> {
    let dishes = DishService::list_for_restaurant(&state.db, restaurant_id).await?;
    Ok(Json(dishes))
}

/// Distance from each of the caller's addresses to a restaurant
#[utoipa::path(
    get,
    path = "/v1/user/{restaurantId}/distance",
    params(("restaurantId" = RestaurantId, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Distances in kilometres", body = RestaurantDistances),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a user", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
#[instrument(skip(state, auth), fields(caller = %auth.0.user_id))]
pub async fn user_get_distance(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(restaurant_id): ValidPath<RestaurantId>,
) -> Result<Json<RestaurantDistances>, AppError> {
    let distances = DishService::distances(&state.db, restaurant_id, auth.0.user_id).await?;
    Ok(Json(distances))
}
