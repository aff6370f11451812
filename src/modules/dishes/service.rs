use anyhow::{Context, anyhow};
use rms_core::AppError;
use rms_core::errors::conflict_or_database;
use rms_models::{
    AddressDistance, CreateDishDto, Dish, DishId, DishListing, Restaurant, RestaurantDistances,
    RestaurantId, UserId,
};
use sqlx::PgPool;
use tracing::instrument;

use crate::middleware::role::FORBIDDEN_MESSAGE;
use crate::modules::restaurants::service::RestaurantService;
use crate::modules::users::service::CredentialService;

use super::distance::{haversine_km, round_to_millis};

const DISH_EXISTS_MESSAGE: &str = "Dish already exists";

const LISTING_QUERY: &str = r#"
    SELECT d.id, d.name, d.price, d.restaurant_id, d.created_at, r.name AS restaurant_name
    FROM dishes d
    INNER JOIN restaurants r ON r.id = d.restaurant_id
    WHERE d.archived_at IS NULL
      AND r.archived_at IS NULL
      AND ($1::uuid IS NULL OR r.created_by = $1)
    ORDER BY d.created_at, d.id
"#;

pub struct DishService;

impl DishService {
    async fn live_restaurant(db: &PgPool, id: RestaurantId) -> Result<Restaurant, AppError> {
        RestaurantService::find(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Restaurant not found")))
    }

    #[instrument(skip(db, name))]
    pub async fn exists(db: &PgPool, restaurant_id: RestaurantId, name: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM dishes
                WHERE restaurant_id = $1 AND name = $2 AND archived_at IS NULL
            )
            "#,
        )
        .bind(restaurant_id)
        .bind(name)
        .fetch_one(db)
        .await
        .context("Failed to check dish existence")?;

        Ok(exists)
    }

    /// Adds a dish to a live restaurant.
    ///
    /// With `owner` set, the restaurant must have been created by that user;
    /// otherwise the call is forbidden.
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        restaurant_id: RestaurantId,
        dto: CreateDishDto,
        owner: Option<UserId>,
    ) -> Result<Dish, AppError> {
        let restaurant = Self::live_restaurant(db, restaurant_id).await?;

        if let Some(owner) = owner {
            if restaurant.created_by != owner {
                tracing::warn!(
                    restaurant_id = %restaurant_id,
                    caller = %owner,
                    "Dish creation on a restaurant the caller does not own"
                );
                return Err(AppError::forbidden(FORBIDDEN_MESSAGE.to_string()));
            }
        }

        if Self::exists(db, restaurant_id, &dto.name).await? {
            return Err(AppError::conflict(DISH_EXISTS_MESSAGE.to_string()));
        }

        let dish = sqlx::query_as::<_, Dish>(
            r#"
            INSERT INTO dishes (id, name, price, restaurant_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, restaurant_id, created_at
            "#,
        )
        .bind(DishId::new())
        .bind(&dto.name)
        .bind(dto.price)
        .bind(restaurant_id)
        .fetch_one(db)
        .await
        .map_err(|e| conflict_or_database(e, DISH_EXISTS_MESSAGE, "Failed to insert dish"))?;

        tracing::info!(dish_id = %dish.id, restaurant_id = %restaurant_id, "Created dish");
        Ok(dish)
    }

    /// Every live dish, optionally only from restaurants made by `created_by`.
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        created_by: Option<UserId>,
    ) -> Result<Vec<DishListing>, AppError> {
        let dishes = sqlx::query_as::<_, DishListing>(LISTING_QUERY)
            .bind(created_by)
            .fetch_all(db)
            .await
            .context("Failed to list dishes")?;

        Ok(dishes)
    }

    #[instrument(skip(db))]
    pub async fn list_for_restaurant(
        db: &PgPool,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Dish>, AppError> {
        Self::live_restaurant(db, restaurant_id).await?;

        let dishes = sqlx::query_as::<_, Dish>(
            r#"
            SELECT id, name, price, restaurant_id, created_at
            FROM dishes
            WHERE restaurant_id = $1 AND archived_at IS NULL
            ORDER BY created_at, id
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(db)
        .await
        .context("Failed to list restaurant dishes")?;

        Ok(dishes)
    }

    /// Distance from each of the user's addresses to the restaurant.
    #[instrument(skip(db))]
    pub async fn distances(
        db: &PgPool,
        restaurant_id: RestaurantId,
        user_id: UserId,
    ) -> Result<RestaurantDistances, AppError> {
        let restaurant = Self::live_restaurant(db, restaurant_id).await?;
        let addresses = CredentialService::addresses(db, user_id).await?;

        let target = (restaurant.latitude, restaurant.longitude);
        let distances = addresses
            .into_iter()
            .map(|address| AddressDistance {
                distance_km: round_to_millis(haversine_km(
                    (address.latitude, address.longitude),
                    target,
                )),
                address: address.address,
            })
            .collect();

        Ok(RestaurantDistances {
            restaurant_id: restaurant.id,
            restaurant_name: restaurant.name,
            distances,
        })
    }
}
