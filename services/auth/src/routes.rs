//! Authentication service routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::AuthError,
    middleware::{AccessClaims, RefreshClaims},
    models::{LoginCredentials, RegistrationRequest},
    password::{hash_password_blocking, verify_password_blocking},
    payload::Payload,
    state::AuthState,
};

/// Response for registration
#[derive(Serialize)]
pub struct RegistrationResponse {
    pub id: i32,
    pub access_token: String,
    pub refresh_token: String,
}

/// Response for login
#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Response for token refresh
#[derive(Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Create the router for the authentication endpoints
pub fn create_router(state: AuthState) -> Router {
    Router::new()
        .route("/api/auth/registration", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh_token))
        .route("/api/auth/logout-access", post(logout_access))
        .route("/api/auth/logout-refresh", post(logout_refresh))
        .with_state(state)
}

/// Employee self-registration endpoint
pub async fn register(
    State(state): State<AuthState>,
    Payload(payload): Payload<RegistrationRequest>,
) -> Result<impl IntoResponse, AuthError> {
    let new_employee = payload.validate()?;
    info!("Registration attempt for {}", new_employee.email);

    if state.employees.email_in_use(&new_employee.email).await? {
        return Err(AuthError::NotFound(format!(
            "Email {} already used",
            new_employee.email
        )));
    }

    let hashed = hash_password_blocking(new_employee.password.clone()).await?;
    let employee = state.employees.create(&new_employee, &hashed).await?;

    let response = RegistrationResponse {
        id: employee.id,
        access_token: state.jwt_service.generate_access_token(&employee)?,
        refresh_token: state.jwt_service.generate_refresh_token(&employee)?,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Employee login endpoint
pub async fn login(
    State(state): State<AuthState>,
    Payload(payload): Payload<LoginCredentials>,
) -> Result<impl IntoResponse, AuthError> {
    let (email, password) = payload.validate()?;
    info!("Login attempt for {}", email);

    let employee = state
        .employees
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AuthError::NotFound(format!("User with email {} doesn't exist", email)))?;

    if !verify_password_blocking(password, employee.hashed_password.clone()).await? {
        warn!("Wrong password for {}", email);
        return Err(AuthError::NotFound("Wrong password".to_string()));
    }

    let response = LoginResponse {
        message: format!("Logged in as {}, ({})", employee.full_name(), employee.email),
        access_token: state.jwt_service.generate_access_token(&employee)?,
        refresh_token: state.jwt_service.generate_refresh_token(&employee)?,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Refresh token endpoint
///
/// Groups are recomputed from the stored account, so a promotion or
/// demotion shows up in the next access token.
pub async fn refresh_token(
    State(state): State<AuthState>,
    RefreshClaims(claims): RefreshClaims,
) -> Result<impl IntoResponse, AuthError> {
    info!("Token refresh request for {}", claims.sub);

    let employee = state
        .employees
        .find_by_email(&claims.sub)
        .await?
        .ok_or_else(|| {
            AuthError::NotFound(format!("User with email {} doesn't exist", claims.sub))
        })?;

    let response = RefreshTokenResponse {
        access_token: state.jwt_service.generate_access_token(&employee)?,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.access_token_expiry(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Revoke the access token used for this request
pub async fn logout_access(
    State(state): State<AuthState>,
    AccessClaims(claims): AccessClaims,
) -> Result<impl IntoResponse, AuthError> {
    state.revoked_tokens.revoke(&claims.jti).await?;

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Access token has been revoked"})),
    ))
}

/// Revoke the refresh token used for this request
pub async fn logout_refresh(
    State(state): State<AuthState>,
    RefreshClaims(claims): RefreshClaims,
) -> Result<impl IntoResponse, AuthError> {
    state.revoked_tokens.revoke(&claims.jti).await?;

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Refresh token has been revoked"})),
    ))
}
