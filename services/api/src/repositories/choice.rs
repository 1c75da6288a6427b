//! Choice repository

use chrono::NaiveDate;
use lunch_common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use crate::models::{
    Page,
    choice::{Choice, ChoiceDetail},
};

const SELECT_DETAIL: &str = r#"
    SELECT c.id, c.current_day, c.employee_id,
           e.firstname, e.lastname, e.email, e.is_active, e.is_admin,
           r.name AS restaurant
    FROM choices c
    JOIN employees e ON e.id = c.employee_id
    LEFT JOIN menu m ON m.id = c.menu_id
    LEFT JOIN restaurant r ON r.id = m.restaurant_id
"#;

/// Choice repository
#[derive(Clone)]
pub struct ChoiceRepository {
    pool: PgPool,
}

impl ChoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a choice; a second one for the same employee and day trips
    /// the `(employee_id, current_day)` unique index
    pub async fn create(&self, day: NaiveDate, employee_id: i32, menu_id: i32) -> DatabaseResult<i32> {
        info!("Employee {} chose menu {} for {}", employee_id, menu_id, day);

        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO choices (current_day, employee_id, menu_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(day)
        .bind(employee_id)
        .bind(menu_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn find(&self, id: i32) -> DatabaseResult<Option<Choice>> {
        let choice = sqlx::query_as::<_, Choice>(
            "SELECT id, current_day, employee_id, menu_id FROM choices WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(choice)
    }

    /// The employee's choice for `day`, if any
    pub async fn find_for_employee_on(
        &self,
        employee_id: i32,
        day: NaiveDate,
    ) -> DatabaseResult<Option<Choice>> {
        let choice = sqlx::query_as::<_, Choice>(
            r#"
            SELECT id, current_day, employee_id, menu_id
            FROM choices
            WHERE employee_id = $1 AND current_day = $2
            "#,
        )
        .bind(employee_id)
        .bind(day)
        .fetch_optional(&self.pool)
        .await?;

        Ok(choice)
    }

    pub async fn detail(&self, id: i32) -> DatabaseResult<Option<ChoiceDetail>> {
        let detail = sqlx::query_as::<_, ChoiceDetail>(&format!("{SELECT_DETAIL} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(detail)
    }

    pub async fn details_for_menu(&self, menu_id: i32) -> DatabaseResult<Vec<ChoiceDetail>> {
        let details = sqlx::query_as::<_, ChoiceDetail>(&format!(
            "{SELECT_DETAIL} WHERE c.menu_id = $1 ORDER BY c.id"
        ))
        .bind(menu_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    pub async fn details_for_employee(&self, employee_id: i32) -> DatabaseResult<Vec<ChoiceDetail>> {
        let details = sqlx::query_as::<_, ChoiceDetail>(&format!(
            "{SELECT_DETAIL} WHERE c.employee_id = $1 ORDER BY c.id"
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    pub async fn details_on(&self, day: NaiveDate, page: Page) -> DatabaseResult<Vec<ChoiceDetail>> {
        let details = sqlx::query_as::<_, ChoiceDetail>(&format!(
            "{SELECT_DETAIL} WHERE c.current_day = $1 ORDER BY c.id LIMIT $2 OFFSET $3"
        ))
        .bind(day)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    pub async fn update(&self, choice: &Choice) -> DatabaseResult<()> {
        info!("Updating choice {}", choice.id);

        sqlx::query("UPDATE choices SET current_day = $2, menu_id = $3 WHERE id = $1")
            .bind(choice.id)
            .bind(choice.current_day)
            .bind(choice.menu_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> DatabaseResult<bool> {
        info!("Deleting choice {}", id);

        let result = sqlx::query("DELETE FROM choices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
