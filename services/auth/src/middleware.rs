//! Extractors for bearer token validation and the admin guard
//!
//! Each extractor parses `Authorization: Bearer <token>`, verifies the
//! signature and expiry, checks the token type and finally consults the
//! revocation ledger.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::warn;

use crate::{
    error::AuthError,
    jwt::{Claims, TokenType},
    state::AuthState,
};

/// Claims of a valid, unrevoked access token
#[derive(Debug, Clone)]
pub struct AccessClaims(pub Claims);

/// Claims of a valid, unrevoked access token carrying the admin group
#[derive(Debug, Clone)]
pub struct AdminClaims(pub Claims);

/// Claims of a valid, unrevoked refresh token
#[derive(Debug, Clone)]
pub struct RefreshClaims(pub Claims);

async fn authorize<S>(parts: &mut Parts, state: &S, expected: TokenType) -> Result<Claims, AuthError>
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthError::Unauthorized("Missing Authorization Header".to_string()))?;

    let auth = AuthState::from_ref(state);
    let claims = auth.jwt_service.validate_token(bearer.token())?;

    if claims.token_type != expected {
        let message = match expected {
            TokenType::Access => "Only non-refresh tokens are allowed",
            TokenType::Refresh => "Only refresh tokens are allowed",
        };
        return Err(AuthError::Unauthorized(message.to_string()));
    }

    if auth.revoked_tokens.is_revoked(&claims.jti).await? {
        warn!("Rejected revoked token for {}", claims.sub);
        return Err(AuthError::Unauthorized("Token has been revoked".to_string()));
    }

    Ok(claims)
}

#[async_trait]
impl<S> FromRequestParts<S> for AccessClaims
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts, state, TokenType::Access).await.map(Self)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminClaims
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let claims = authorize(parts, state, TokenType::Access).await?;
        claims.require_admin()?;
        Ok(Self(claims))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RefreshClaims
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts, state, TokenType::Refresh).await.map(Self)
    }
}
