use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use rms_auth::Role;
use rms_models::{
    Address, AddressDistance, CreateAddressDto, CreateDishDto, CreateRestaurantDto,
    CreateSubAdminDto, CreateUserDto, Dish, DishListing, HealthResponse, InfoResponse,
    LoginRequest, LoginResponse, LogoutResponse, Restaurant, RestaurantDistances,
    RestaurantWithDishes, User, UserWithAddresses,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::check,
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::info,
        crate::modules::users::controller::create_sub_admin,
        crate::modules::users::controller::get_sub_admins,
        crate::modules::users::controller::admin_create_user,
        crate::modules::users::controller::admin_get_users,
        crate::modules::users::controller::sub_admin_create_user,
        crate::modules::users::controller::sub_admin_get_users,
        crate::modules::restaurants::controller::admin_create_restaurant,
        crate::modules::restaurants::controller::admin_get_restaurants,
        crate::modules::restaurants::controller::sub_admin_create_restaurant,
        crate::modules::restaurants::controller::sub_admin_get_restaurants,
        crate::modules::restaurants::controller::user_get_restaurants,
        crate::modules::dishes::controller::admin_create_dish,
        crate::modules::dishes::controller::admin_get_all_dishes,
        crate::modules::dishes::controller::sub_admin_create_dish,
        crate::modules::dishes::controller::sub_admin_get_all_dishes,
        crate::modules::dishes::controller::user_get_all_dishes,
        crate::modules::dishes::controller::user_get_restaurant_dishes,
        crate::modules::dishes::controller::user_get_distance,
    ),
    components(
        schemas(
            Role,
            User,
            UserWithAddresses,
            Address,
            CreateAddressDto,
            CreateUserDto,
            CreateSubAdminDto,
            Restaurant,
            RestaurantWithDishes,
            CreateRestaurantDto,
            Dish,
            DishListing,
            CreateDishDto,
            AddressDistance,
            RestaurantDistances,
            LoginRequest,
            LoginResponse,
            LogoutResponse,
            HealthResponse,
            InfoResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login and session endpoints"),
        (name = "Admin", description = "Admin-only management endpoints"),
        (name = "Sub-admin", description = "Endpoints scoped to what the calling sub-admin created"),
        (name = "User", description = "Restaurant and dish browsing for users")
    ),
    info(
        title = "RMS API",
        version = "0.1.0",
        description = "Restaurant management REST API with session-backed JWT authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
