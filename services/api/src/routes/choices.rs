//! Choice ledger endpoints
//!
//! An employee picks at most one menu per calendar day. The acting
//! employee always comes from the access token subject.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use lunch_auth::{AccessClaims, Claims, Payload, models::Employee};
use serde_json::json;
use tracing::warn;

use super::message;
use crate::{
    error::{ApiError, ApiResult},
    models::choice::{Choice, ChoiceQuery, ChoiceRequest, ChoiceView},
    state::AppState,
};

const NOT_FOUND: &str = "Choice not found.";
const NONE_TODAY: &str = "Choices not found.";
const MENU_NOT_FOUND: &str = "Menu not found.";
const ALREADY_CHOSEN: &str = "You have already chosen";
const NOT_ALLOWED: &str = "Not allowed";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/choices", post(create_choice))
        .route("/api/choices/", post(create_choice))
        .route("/api/choices/current", get(current_day_choices))
        .route(
            "/api/choices/:id",
            get(get_choice).patch(update_choice).delete(delete_choice),
        )
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

async fn acting_employee(state: &AppState, claims: &Claims) -> ApiResult<Employee> {
    state
        .employees()
        .find_by_email(&claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User with email {} doesn't exist", claims.sub)))
}

/// Load a choice and check it belongs to the caller
async fn owned_choice(state: &AppState, claims: &Claims, id: i32) -> ApiResult<Choice> {
    let employee = acting_employee(state, claims).await?;
    let choice = state
        .choices
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;

    if choice.employee_id != employee.id {
        warn!("{} tried to touch choice {}", claims.sub, id);
        return Err(ApiError::NotAllowed(NOT_ALLOWED.into()));
    }

    Ok(choice)
}

pub async fn get_choice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let detail = state
        .choices
        .detail(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;

    Ok(Json(ChoiceView::from(detail)))
}

/// Choices recorded for today
pub async fn current_day_choices(
    State(state): State<AppState>,
    Query(query): Query<ChoiceQuery>,
) -> ApiResult<impl IntoResponse> {
    let details = state.choices.details_on(today(), query.page()).await?;
    if details.is_empty() {
        return Err(ApiError::NotFound(NONE_TODAY.into()));
    }

    Ok(Json(
        details.into_iter().map(ChoiceView::from).collect::<Vec<_>>(),
    ))
}

pub async fn create_choice(
    State(state): State<AppState>,
    AccessClaims(claims): AccessClaims,
    Payload(payload): Payload<ChoiceRequest>,
) -> ApiResult<impl IntoResponse> {
    let menu_id = payload.menu_id()?;
    let employee = acting_employee(&state, &claims).await?;
    let day = today();

    if state
        .choices
        .find_for_employee_on(employee.id, day)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest(ALREADY_CHOSEN.into()));
    }
    if !state.menus.exists(menu_id).await? {
        return Err(ApiError::NotFound(MENU_NOT_FOUND.into()));
    }

    let id = state.choices.create(day, employee.id, menu_id).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Move a choice to another menu; the day becomes today
pub async fn update_choice(
    State(state): State<AppState>,
    AccessClaims(claims): AccessClaims,
    Path(id): Path<i32>,
    Payload(payload): Payload<ChoiceRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut choice = owned_choice(&state, &claims, id).await?;

    if let Some(menu_id) = payload.menu_id {
        if !state.menus.exists(menu_id).await? {
            return Err(ApiError::NotFound(MENU_NOT_FOUND.into()));
        }

        let day = today();
        let other = state
            .choices
            .find_for_employee_on(choice.employee_id, day)
            .await?;
        if other.is_some_and(|other| other.id != choice.id) {
            return Err(ApiError::BadRequest(ALREADY_CHOSEN.into()));
        }

        choice.reassign(menu_id, day);
        state.choices.update(&choice).await?;
    }

    Ok(message("Updated"))
}

pub async fn delete_choice(
    State(state): State<AppState>,
    AccessClaims(claims): AccessClaims,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let choice = owned_choice(&state, &claims, id).await?;

    if !state.choices.delete(choice.id).await? {
        return Err(ApiError::NotFound(NOT_FOUND.into()));
    }

    Ok(message("Deleted"))
}
