use std::collections::HashMap;

use anyhow::Context;
use rms_core::AppError;
use rms_core::errors::conflict_or_database;
use rms_db::with_transaction;
use rms_models::{CreateRestaurantDto, Dish, Restaurant, RestaurantId, RestaurantWithDishes, UserId};
use sqlx::PgPool;
use tracing::instrument;

const RESTAURANT_EXISTS_MESSAGE: &str = "Restaurant already exists";

const RESTAURANT_COLUMNS: &str = "id, name, address, latitude, longitude, created_by, created_at";

pub struct RestaurantService;

impl RestaurantService {
    #[instrument(skip(db, name, address))]
    pub async fn exists(db: &PgPool, name: &str, address: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM restaurants
                WHERE name = $1 AND address = $2 AND archived_at IS NULL
            )
            "#,
        )
        .bind(name)
        .bind(address)
        .fetch_one(db)
        .await
        .context("Failed to check restaurant existence")?;

        Ok(exists)
    }

    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        dto: CreateRestaurantDto,
        created_by: UserId,
    ) -> Result<Restaurant, AppError> {
        if Self::exists(db, &dto.name, &dto.address).await? {
            return Err(AppError::conflict(RESTAURANT_EXISTS_MESSAGE.to_string()));
        }

        let restaurant = with_transaction(db, "create_restaurant", move |tx| {
            Box::pin(async move {
                let restaurant = sqlx::query_as::<_, Restaurant>(&format!(
                    r#"
                    INSERT INTO restaurants (id, name, address, latitude, longitude, created_by)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING {RESTAURANT_COLUMNS}
                    "#
                ))
                .bind(RestaurantId::new())
                .bind(&dto.name)
                .bind(&dto.address)
                .bind(dto.latitude)
                .bind(dto.longitude)
                .bind(created_by)
                .fetch_one(&mut **tx)
                .await
                .map_err(|e| {
                    conflict_or_database(e, RESTAURANT_EXISTS_MESSAGE, "Failed to insert restaurant")
                })?;

                Ok(restaurant)
            })
        })
        .await?;

        tracing::info!(restaurant_id = %restaurant.id, "Created restaurant");
        Ok(restaurant)
    }

    #[instrument(skip(db))]
    pub async fn find(db: &PgPool, id: RestaurantId) -> Result<Option<Restaurant>, AppError> {
        let restaurant = sqlx::query_as::<_, Restaurant>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1 AND archived_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch restaurant")?;

        Ok(restaurant)
    }

    /// Live restaurants with their live dishes, optionally only those made by
    /// `created_by`.
    #[instrument(skip(db))]
    pub async fn list_with_dishes(
        db: &PgPool,
        created_by: Option<UserId>,
    ) -> Result<Vec<RestaurantWithDishes>, AppError> {
        let restaurants = sqlx::query_as::<_, Restaurant>(&format!(
            r#"
            SELECT {RESTAURANT_COLUMNS} FROM restaurants
            WHERE archived_at IS NULL
              AND ($1::uuid IS NULL OR created_by = $1)
            ORDER BY created_at, id
            "#
        ))
        .bind(created_by)
        .fetch_all(db)
        .await
        .context("Failed to list restaurants")?;

        let ids: Vec<RestaurantId> = restaurants.iter().map(|r| r.id).collect();

        let dishes = sqlx::query_as::<_, Dish>(
            r#"
            SELECT id, name, price, restaurant_id, created_at
            FROM dishes
            WHERE restaurant_id = ANY($1) AND archived_at IS NULL
            ORDER BY created_at, id
            "#,
        )
        .bind(&ids)
        .fetch_all(db)
        .await
        .context("Failed to fetch dishes for restaurants")?;

        let mut by_restaurant: HashMap<RestaurantId, Vec<Dish>> = HashMap::new();
        for dish in dishes {
            by_restaurant.entry(dish.restaurant_id).or_default().push(dish);
        }

        Ok(restaurants
            .into_iter()
            .map(|restaurant| RestaurantWithDishes {
                dishes: by_restaurant.remove(&restaurant.id).unwrap_or_default(),
                restaurant,
            })
            .collect())
    }
}
