//! # RMS Models
//!
//! Domain models and DTOs for the RMS API.
//!
//! - [`ids`]: strongly-typed entity ids
//! - [`auth`]: login/logout request and response bodies
//! - [`sessions`]: the session-owner row read by the authentication middleware
//! - [`users`]: credentials, user records and creation DTOs
//! - [`addresses`]: user addresses
//! - [`restaurants`]: restaurants and their dish listings
//! - [`dishes`]: dishes and distance results
//!
//! # Example
//!
//! ```ignore
//! use rms_models::users::CreateUserDto;
//! use validator::Validate;
//!
//! let dto: CreateUserDto = serde_json::from_str(body)?;
//! dto.validate()?;
//! ```

pub mod addresses;
pub mod auth;
pub mod dishes;
pub mod ids;
pub mod restaurants;
pub mod sessions;
pub mod users;
mod validation;

// Re-export commonly used types at crate root for convenience
pub use addresses::{Address, CreateAddressDto};
pub use auth::{HealthResponse, InfoResponse, LoginRequest, LoginResponse, LogoutResponse};
pub use dishes::{AddressDistance, CreateDishDto, Dish, DishListing, RestaurantDistances};
pub use ids::{AddressId, DishId, RestaurantId, SessionId, UserId};
pub use restaurants::{CreateRestaurantDto, Restaurant, RestaurantWithDishes};
pub use sessions::SessionOwner;
pub use users::{CreateSubAdminDto, CreateUserDto, LoginData, User, UserWithAddresses};
