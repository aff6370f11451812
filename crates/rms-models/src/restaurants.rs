//! Restaurant models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::dishes::Dish;
use crate::ids::{RestaurantId, UserId};
use crate::validation::validate_address_line;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantWithDishes {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub dishes: Vec<Dish>,
}

/// Restaurants are unique by `(name, address)` among live rows.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRestaurantDto {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(custom(
        function = "validate_address_line",
        message = "Address may only contain letters, digits and spaces"
    ))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,
}
