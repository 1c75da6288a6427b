//! Employee directory endpoints
//!
//! Every route needs an access token. Admins manage any account; other
//! employees may only change their own password or deactivate themselves.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use lunch_auth::{
    AccessClaims, AdminClaims, Claims, Payload, models::RegistrationRequest,
    password::hash_password_blocking,
};
use serde_json::json;
use tracing::{info, warn};

use super::message;
use crate::{
    error::{ApiError, ApiResult},
    models::{
        Page,
        employee::{AdminUpdate, EmployeeLookup, EmployeeQuery, EmployeeUpdateRequest, UpdateScope},
    },
    state::AppState,
    views,
};

const NOT_FOUND: &str = "Employee not found.";
const NOT_ALLOWED: &str = "Not allowed";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/employees", get(list_employees).post(create_employee))
        .route("/api/employees/", get(list_employees).post(create_employee))
        .route("/api/employees/inactive", get(list_inactive_employees))
        .route("/api/employees/current", get(current_employee))
        .route(
            "/api/employees/:id",
            get(get_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
}

/// Id of the account behind the token, if it is still active
async fn caller_id(state: &AppState, claims: &Claims) -> ApiResult<Option<i32>> {
    Ok(state
        .employees()
        .find_by_email(&claims.sub)
        .await?
        .map(|employee| employee.id))
}

/// List active employees, or look one up by full name or email
pub async fn list_employees(
    State(state): State<AppState>,
    AccessClaims(_): AccessClaims,
    Query(query): Query<EmployeeQuery>,
) -> ApiResult<Response> {
    let found = match query.lookup() {
        EmployeeLookup::ByName {
            firstname,
            lastname,
        } => state.employees().find_by_name(&firstname, &lastname).await?,
        EmployeeLookup::ByEmail(email) => state.employees().find_by_email(&email).await?,
        EmployeeLookup::List(page) => {
            let employees = state.employees().list_active(page.offset, page.limit).await?;
            let mut list = Vec::with_capacity(employees.len());
            for employee in &employees {
                list.push(views::employee_view(&state, employee).await?);
            }
            return Ok(Json(list).into_response());
        }
    };

    let employee = found.ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    Ok(Json(views::employee_view(&state, &employee).await?).into_response())
}

pub async fn list_inactive_employees(
    State(state): State<AppState>,
    AdminClaims(_): AdminClaims,
    Query(query): Query<EmployeeQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = Page::new(query.offset, query.limit);
    let employees = state
        .employees()
        .list_inactive(page.offset, page.limit)
        .await?;

    let mut list = Vec::with_capacity(employees.len());
    for employee in &employees {
        list.push(views::employee_view(&state, employee).await?);
    }

    Ok(Json(list))
}

/// The employee the access token was issued to
pub async fn current_employee(
    State(state): State<AppState>,
    AccessClaims(claims): AccessClaims,
) -> ApiResult<impl IntoResponse> {
    let employee = state
        .employees()
        .find_by_email(&claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;

    Ok(Json(views::employee_view(&state, &employee).await?))
}

pub async fn get_employee(
    State(state): State<AppState>,
    AccessClaims(_): AccessClaims,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let employee = state
        .employees()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;

    Ok(Json(views::employee_view(&state, &employee).await?))
}

pub async fn create_employee(
    State(state): State<AppState>,
    AdminClaims(_): AdminClaims,
    Payload(payload): Payload<RegistrationRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_employee = payload.validate()?;

    if state.employees().email_in_use(&new_employee.email).await? {
        return Err(ApiError::NotFound(format!(
            "Email {} already used",
            new_employee.email
        )));
    }

    let hashed = hash_password_blocking(new_employee.password.clone()).await?;
    let employee = state.employees().create(&new_employee, &hashed).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": employee.id }))))
}

pub async fn update_employee(
    State(state): State<AppState>,
    AccessClaims(claims): AccessClaims,
    Path(id): Path<i32>,
    Payload(payload): Payload<EmployeeUpdateRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut employee = state
        .employees()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;

    let caller = if claims.is_admin() {
        None
    } else {
        caller_id(&state, &claims).await?
    };

    let outcome = match UpdateScope::resolve(claims.is_admin(), caller, employee.id) {
        UpdateScope::Denied => {
            warn!("{} may not update employee {}", claims.sub, id);
            return Err(ApiError::NotAllowed(NOT_ALLOWED.into()));
        }
        UpdateScope::PasswordOnly => AdminUpdate::Applied,
        UpdateScope::Full => {
            let email_taken = match payload.changed_email(&employee) {
                Some(email) => state.employees().email_in_use(email).await?,
                None => false,
            };
            payload.apply_as_admin(&mut employee, email_taken)?
        }
    };

    if let Some(password) = payload.new_password()? {
        employee.hashed_password = hash_password_blocking(password.to_string()).await?;
    }

    state.employees().update(&employee).await?;

    match outcome {
        AdminUpdate::Applied => Ok(message("Updated")),
        AdminUpdate::EmailSkipped(email) => {
            info!("Employee {} updated without email change", id);
            Ok(message(format!("Updated, but email {} already used", email)))
        }
    }
}

/// Soft-delete an employee
pub async fn delete_employee(
    State(state): State<AppState>,
    AccessClaims(claims): AccessClaims,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let employee = state
        .employees()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;

    if !claims.is_admin() && caller_id(&state, &claims).await? != Some(employee.id) {
        warn!("{} may not deactivate employee {}", claims.sub, id);
        return Err(ApiError::MethodNotAllowed(NOT_ALLOWED.into()));
    }

    state.employees().deactivate(employee.id).await?;

    Ok(message("Deleted"))
}
