//! Dish models and the restaurant distance result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{DishId, RestaurantId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: DishId,
    pub name: String,
    pub price: i32,
    pub restaurant_id: RestaurantId,
    pub created_at: DateTime<Utc>,
}

/// A dish in a flat listing, joined with its restaurant's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishListing {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub dish: Dish,
    pub restaurant_name: String,
}

/// Dish names are unique within one restaurant.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDishDto {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i32,
}

/// Great-circle distance from one of the caller's addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDistance {
    pub address: String,
    /// Kilometres, rounded to three decimals
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDistances {
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
    pub distances: Vec<AddressDistance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let dto = CreateDishDto {
            name: "Dal".to_string(),
            price: -1,
        };
        assert!(dto.validate().is_err());

        let free = CreateDishDto {
            name: "Water".to_string(),
            price: 0,
        };
        assert!(free.validate().is_ok());
    }

    #[test]
    fn test_listing_flattens_dish() {
        let listing = DishListing {
            dish: Dish {
                id: DishId::new(),
                name: "Dal".to_string(),
                price: 120,
                restaurant_id: RestaurantId::new(),
                created_at: Utc::now(),
            },
            restaurant_name: "Spice Route".to_string(),
        };
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["name"], "Dal");
        assert_eq!(value["price"], 120);
        assert_eq!(value["restaurantName"], "Spice Route");
        assert!(value.get("dish").is_none());
    }
}
