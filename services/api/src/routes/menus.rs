//! Menu registry endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use lunch_auth::{AdminClaims, Payload};
use serde_json::json;
use tracing::info;

use super::message;
use crate::{
    error::{ApiError, ApiResult},
    models::menu::{MenuQuery, MenuRequest},
    state::AppState,
    views,
};

const NOT_FOUND: &str = "Menu not found.";
const RESTAURANT_NOT_FOUND: &str = "Restaurant not found.";
const RESTAURANT_TAKEN: &str = "This restaurant already has a menu.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/menus", get(list_menus).post(create_menu))
        .route("/api/menus/", get(list_menus).post(create_menu))
        .route(
            "/api/menus/:id",
            get(get_menu).patch(update_menu).delete(delete_menu),
        )
}

pub async fn list_menus(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> ApiResult<impl IntoResponse> {
    let menus = state.menus.list(query.page()).await?;
    let mut list = Vec::with_capacity(menus.len());
    for menu in menus {
        list.push(views::menu_view(&state, menu).await?);
    }

    Ok(Json(list))
}

pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let menu = state
        .menus
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;

    Ok(Json(views::menu_view(&state, menu).await?))
}

/// Check that a restaurant exists and has no menu yet
async fn ensure_restaurant_free(state: &AppState, restaurant_id: i32) -> ApiResult<()> {
    if state.restaurants.find_by_id(restaurant_id).await?.is_none() {
        return Err(ApiError::NotFound(RESTAURANT_NOT_FOUND.into()));
    }
    if state.menus.find_by_restaurant(restaurant_id).await?.is_some() {
        return Err(ApiError::NotFound(RESTAURANT_TAKEN.into()));
    }
    Ok(())
}

pub async fn create_menu(
    State(state): State<AppState>,
    AdminClaims(_): AdminClaims,
    Payload(payload): Payload<MenuRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_menu = payload.validate()?;
    ensure_restaurant_free(&state, new_menu.restaurant_id).await?;

    let id = state.menus.create(&new_menu).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Patch day texts and optionally move the menu to another restaurant
pub async fn update_menu(
    State(state): State<AppState>,
    AdminClaims(_): AdminClaims,
    Path(id): Path<i32>,
    Payload(payload): Payload<MenuRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut menu = state
        .menus
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;

    if let Some(restaurant_id) = payload.restaurant_id {
        ensure_restaurant_free(&state, restaurant_id).await?;
        info!("Moving menu {} to restaurant {}", id, restaurant_id);
        menu.restaurant_id = Some(restaurant_id);
    }
    payload.apply_days(&mut menu)?;

    state.menus.update(&menu).await?;

    Ok(message("Updated"))
}

pub async fn delete_menu(
    State(state): State<AppState>,
    AdminClaims(_): AdminClaims,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    if !state.menus.delete(id).await? {
        return Err(ApiError::NotFound(NOT_FOUND.into()));
    }

    Ok(message("Deleted"))
}
