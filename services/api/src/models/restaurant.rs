//! Restaurant models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Page, menu::MenuView, non_empty, or_empty_object};
use crate::error::ApiError;

const NAME_MAX_LEN: usize = 120;
const NAME_HINT: &str = r#"Please, specify "name"."#;

/// Restaurant entity
#[derive(Debug, Clone, FromRow)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
}

/// Body for creating or renaming a restaurant
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantRequest {
    pub name: Option<String>,
}

impl RestaurantRequest {
    /// Name for a new restaurant; required
    pub fn required_name(&self) -> Result<String, ApiError> {
        let name = non_empty(&self.name).ok_or_else(|| ApiError::BadRequest(NAME_HINT.into()))?;
        check_length(name)?;
        Ok(name.to_string())
    }

    /// Replacement name, if one was supplied
    pub fn new_name(&self) -> Result<Option<String>, ApiError> {
        non_empty(&self.name)
            .map(|name| check_length(name).map(|_| name.to_string()))
            .transpose()
    }
}

fn check_length(name: &str) -> Result<(), ApiError> {
    if name.chars().count() > NAME_MAX_LEN {
        return Err(ApiError::BadRequest(format!(
            "name must be at most {} characters long",
            NAME_MAX_LEN
        )));
    }
    Ok(())
}

/// Query parameters for GET /api/restaurants/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantQuery {
    /// Exact name to look up instead of listing
    pub name: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl RestaurantQuery {
    pub fn page(&self) -> Page {
        Page::new(self.offset, self.limit)
    }
}

/// Restaurant projection with its menu (`{}` when it has none)
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantView {
    pub id: i32,
    pub name: String,
    #[serde(serialize_with = "or_empty_object")]
    pub menus: Option<MenuView>,
}

impl RestaurantView {
    pub fn new(restaurant: Restaurant, menu: Option<MenuView>) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            menus: menu,
        }
    }
}
