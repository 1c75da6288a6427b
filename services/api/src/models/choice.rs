//! Daily choice models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Page, employee::EmployeeSummary, or_empty_object};
use crate::error::ApiError;

const CHOICE_HINT: &str = r#"Please, specify "menu_id"."#;

/// Choice row
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Choice {
    pub id: i32,
    pub current_day: NaiveDate,
    pub employee_id: i32,
    pub menu_id: i32,
}

impl Choice {
    /// Point the choice at another menu; the day is reset to `today`
    pub fn reassign(&mut self, menu_id: i32, today: NaiveDate) {
        self.menu_id = menu_id;
        self.current_day = today;
    }
}

/// Body for creating or moving a choice
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceRequest {
    pub menu_id: Option<i32>,
}

impl ChoiceRequest {
    pub fn menu_id(&self) -> Result<i32, ApiError> {
        self.menu_id
            .ok_or_else(|| ApiError::BadRequest(CHOICE_HINT.to_string()))
    }
}

/// Query parameters for GET /api/choices/current
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ChoiceQuery {
    pub fn page(&self) -> Page {
        Page::new(self.offset, self.limit)
    }
}

/// Choice joined with its employee and the restaurant behind its menu
#[derive(Debug, Clone, FromRow)]
pub struct ChoiceDetail {
    pub id: i32,
    pub current_day: NaiveDate,
    pub employee_id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub restaurant: Option<String>,
}

/// Choice projection; a deactivated employee shows up as `{}`
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceView {
    pub id: i32,
    pub current_day: NaiveDate,
    #[serde(serialize_with = "or_empty_object")]
    pub employee: Option<EmployeeSummary>,
    pub restaurant: Option<String>,
}

impl From<ChoiceDetail> for ChoiceView {
    fn from(detail: ChoiceDetail) -> Self {
        let employee = detail.is_active.then(|| EmployeeSummary {
            id: detail.employee_id,
            firstname: detail.firstname,
            lastname: detail.lastname,
            email: detail.email,
            is_active: detail.is_active,
            is_admin: detail.is_admin,
        });

        Self {
            id: detail.id,
            current_day: detail.current_day,
            employee,
            restaurant: detail.restaurant,
        }
    }
}
