//! Menu repository
//!
//! Every read joins the owning restaurant so its name can be projected
//! alongside the menu.

use lunch_common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use crate::models::{
    Page,
    menu::{Menu, NewMenu},
};

const SELECT_MENU: &str = r#"
    SELECT m.id, m.restaurant_id, r.name AS restaurant,
           m.monday, m.tuesday, m.wednesday, m.thursday, m.friday, m.saturday, m.sunday
    FROM menu m
    LEFT JOIN restaurant r ON r.id = m.restaurant_id
"#;

/// Menu repository
#[derive(Clone)]
pub struct MenuRepository {
    pool: PgPool,
}

impl MenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a menu and return its id
    pub async fn create(&self, menu: &NewMenu) -> DatabaseResult<i32> {
        info!("Creating menu for restaurant {}", menu.restaurant_id);

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO menu (restaurant_id, monday, tuesday, wednesday, thursday, friday, saturday, sunday)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(menu.restaurant_id)
        .bind(&menu.monday)
        .bind(&menu.tuesday)
        .bind(&menu.wednesday)
        .bind(&menu.thursday)
        .bind(&menu.friday)
        .bind(&menu.saturday)
        .bind(&menu.sunday)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Menu>> {
        let menu = sqlx::query_as::<_, Menu>(&format!("{SELECT_MENU} WHERE m.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(menu)
    }

    pub async fn find_by_restaurant(&self, restaurant_id: i32) -> DatabaseResult<Option<Menu>> {
        let menu =
            sqlx::query_as::<_, Menu>(&format!("{SELECT_MENU} WHERE m.restaurant_id = $1"))
                .bind(restaurant_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(menu)
    }

    pub async fn exists(&self, id: i32) -> DatabaseResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM menu WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    pub async fn list(&self, page: Page) -> DatabaseResult<Vec<Menu>> {
        let menus = sqlx::query_as::<_, Menu>(&format!(
            "{SELECT_MENU} ORDER BY m.id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(menus)
    }

    /// Persist the restaurant link and every day column
    pub async fn update(&self, menu: &Menu) -> DatabaseResult<()> {
        info!("Updating menu {}", menu.id);

        sqlx::query(
            r#"
            UPDATE menu
            SET restaurant_id = $2, monday = $3, tuesday = $4, wednesday = $5,
                thursday = $6, friday = $7, saturday = $8, sunday = $9
            WHERE id = $1
            "#,
        )
        .bind(menu.id)
        .bind(menu.restaurant_id)
        .bind(&menu.monday)
        .bind(&menu.tuesday)
        .bind(&menu.wednesday)
        .bind(&menu.thursday)
        .bind(&menu.friday)
        .bind(&menu.saturday)
        .bind(&menu.sunday)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a menu together with its choices
    pub async fn delete(&self, id: i32) -> DatabaseResult<bool> {
        info!("Deleting menu {}", id);

        let result = sqlx::query("DELETE FROM menu WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
