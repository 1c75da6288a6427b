//! Weekly menu models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Page, choice::ChoiceView, non_empty};
use crate::error::ApiError;

const DAY_MAX_LEN: usize = 500;
const MENU_HINT: &str = r#"Please, specify "restaurant_id", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday" and "sunday"."#;

/// Menu row joined with the owning restaurant's name
#[derive(Debug, Clone, FromRow)]
pub struct Menu {
    pub id: i32,
    pub restaurant_id: Option<i32>,
    pub restaurant: Option<String>,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
}

/// Validated menu creation payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenu {
    pub restaurant_id: i32,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
}

/// Body for creating or patching a menu
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuRequest {
    pub restaurant_id: Option<i32>,
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
    pub sunday: Option<String>,
}

impl MenuRequest {
    /// Every field is required on creation
    pub fn validate(&self) -> Result<NewMenu, ApiError> {
        let hint = || ApiError::BadRequest(MENU_HINT.to_string());
        let day = |value: &Option<String>| -> Result<String, ApiError> {
            let text = non_empty(value).ok_or_else(hint)?;
            check_day(text)?;
            Ok(text.to_string())
        };

        Ok(NewMenu {
            restaurant_id: self.restaurant_id.ok_or_else(hint)?,
            monday: day(&self.monday)?,
            tuesday: day(&self.tuesday)?,
            wednesday: day(&self.wednesday)?,
            thursday: day(&self.thursday)?,
            friday: day(&self.friday)?,
            saturday: day(&self.saturday)?,
            sunday: day(&self.sunday)?,
        })
    }

    /// Overwrite the days that carry a non-empty value; `restaurant_id` is
    /// left to the caller since moving a menu needs database checks
    pub fn apply_days(&self, menu: &mut Menu) -> Result<(), ApiError> {
        let days = [
            (&self.monday, &mut menu.monday),
            (&self.tuesday, &mut menu.tuesday),
            (&self.wednesday, &mut menu.wednesday),
            (&self.thursday, &mut menu.thursday),
            (&self.friday, &mut menu.friday),
            (&self.saturday, &mut menu.saturday),
            (&self.sunday, &mut menu.sunday),
        ];

        for (value, slot) in days {
            if let Some(text) = non_empty(value) {
                check_day(text)?;
                *slot = text.to_string();
            }
        }

        Ok(())
    }
}

fn check_day(text: &str) -> Result<(), ApiError> {
    if text.chars().count() > DAY_MAX_LEN {
        return Err(ApiError::BadRequest(format!(
            "a day's menu must be at most {} characters long",
            DAY_MAX_LEN
        )));
    }
    Ok(())
}

/// Query parameters for GET /api/menus/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl MenuQuery {
    pub fn page(&self) -> Page {
        Page::new(self.offset, self.limit)
    }
}

/// Menu projection with the choices made from it
#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub id: i32,
    pub restaurant_id: Option<i32>,
    pub restaurant: Option<String>,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
    pub choices: Vec<ChoiceView>,
}

impl MenuView {
    pub fn new(menu: Menu, choices: Vec<ChoiceView>) -> Self {
        Self {
            id: menu.id,
            restaurant_id: menu.restaurant_id,
            restaurant: menu.restaurant,
            monday: menu.monday,
            tuesday: menu.tuesday,
            wednesday: menu.wednesday,
            thursday: menu.thursday,
            friday: menu.friday,
            saturday: menu.saturday,
            sunday: menu.sunday,
            choices,
        }
    }
}
