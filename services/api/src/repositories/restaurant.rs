//! Restaurant repository

use lunch_common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use crate::models::{Page, restaurant::Restaurant};

/// Restaurant repository
#[derive(Clone)]
pub struct RestaurantRepository {
    pool: PgPool,
}

impl RestaurantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str) -> DatabaseResult<Restaurant> {
        info!("Creating restaurant: {}", name);

        let restaurant = sqlx::query_as::<_, Restaurant>(
            "INSERT INTO restaurant (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(restaurant)
    }

    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Restaurant>> {
        let restaurant =
            sqlx::query_as::<_, Restaurant>("SELECT id, name FROM restaurant WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(restaurant)
    }

    /// Names are not unique; the oldest match wins
    pub async fn find_by_name(&self, name: &str) -> DatabaseResult<Option<Restaurant>> {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            "SELECT id, name FROM restaurant WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(restaurant)
    }

    pub async fn list(&self, page: Page) -> DatabaseResult<Vec<Restaurant>> {
        let restaurants = sqlx::query_as::<_, Restaurant>(
            "SELECT id, name FROM restaurant ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(restaurants)
    }

    pub async fn rename(&self, id: i32, name: &str) -> DatabaseResult<()> {
        info!("Renaming restaurant {} to {}", id, name);

        sqlx::query("UPDATE restaurant SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete a restaurant; its menu survives with a NULL `restaurant_id`
    pub async fn delete(&self, id: i32) -> DatabaseResult<bool> {
        info!("Deleting restaurant {}", id);

        let result = sqlx::query("DELETE FROM restaurant WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
