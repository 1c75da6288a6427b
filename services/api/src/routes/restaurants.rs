//! Restaurant catalog endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use lunch_auth::{AdminClaims, Payload};
use serde_json::json;

use super::message;
use crate::{
    error::{ApiError, ApiResult},
    models::restaurant::{RestaurantQuery, RestaurantRequest},
    state::AppState,
    views,
};

const NOT_FOUND: &str = "Restaurant not found.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/restaurants",
            get(list_restaurants).post(create_restaurant),
        )
        .route(
            "/api/restaurants/",
            get(list_restaurants).post(create_restaurant),
        )
        .route(
            "/api/restaurants/:id",
            get(get_restaurant)
                .patch(update_restaurant)
                .delete(delete_restaurant),
        )
}

/// List restaurants, or look one up by exact name
pub async fn list_restaurants(
    State(state): State<AppState>,
    Query(query): Query<RestaurantQuery>,
) -> ApiResult<Response> {
    if let Some(name) = query.name.as_deref() {
        let restaurant = state
            .restaurants
            .find_by_name(name)
            .await?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
        let view = views::restaurant_view(&state, restaurant).await?;
        return Ok(Json(view).into_response());
    }

    let restaurants = state.restaurants.list(query.page()).await?;
    let mut list = Vec::with_capacity(restaurants.len());
    for restaurant in restaurants {
        list.push(views::restaurant_view(&state, restaurant).await?);
    }

    Ok(Json(list).into_response())
}

pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let restaurant = state
        .restaurants
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;

    Ok(Json(views::restaurant_view(&state, restaurant).await?))
}

pub async fn create_restaurant(
    State(state): State<AppState>,
    AdminClaims(_): AdminClaims,
    Payload(payload): Payload<RestaurantRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = payload.required_name()?;
    let restaurant = state.restaurants.create(&name).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": restaurant.id }))))
}

pub async fn update_restaurant(
    State(state): State<AppState>,
    AdminClaims(_): AdminClaims,
    Path(id): Path<i32>,
    Payload(payload): Payload<RestaurantRequest>,
) -> ApiResult<impl IntoResponse> {
    if state.restaurants.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound(NOT_FOUND.into()));
    }

    if let Some(name) = payload.new_name()? {
        state.restaurants.rename(id, &name).await?;
    }

    Ok(message("Updated"))
}

pub async fn delete_restaurant(
    State(state): State<AppState>,
    AdminClaims(_): AdminClaims,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    if !state.restaurants.delete(id).await? {
        return Err(ApiError::NotFound(NOT_FOUND.into()));
    }

    Ok(message("Deleted"))
}
