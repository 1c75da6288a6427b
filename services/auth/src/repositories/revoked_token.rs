//! Revocation ledger repository
//!
//! The ledger is append-only: rows are never deleted, and every
//! authenticated request looks its token's `jti` up here.

use lunch_common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use crate::models::RevokedToken;

/// Revoked token repository
#[derive(Clone)]
pub struct RevokedTokenRepository {
    pool: PgPool,
}

impl RevokedTokenRepository {
    /// Create a new revoked token repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a token identifier to the ledger
    pub async fn revoke(&self, jti: &str) -> DatabaseResult<RevokedToken> {
        info!("Revoking token {}", jti);

        let revoked = sqlx::query_as::<_, RevokedToken>(
            r#"
            INSERT INTO revoked_tokens (jti)
            VALUES ($1)
            RETURNING id, jti, blacklisted_on
            "#,
        )
        .bind(jti)
        .fetch_one(&self.pool)
        .await?;

        Ok(revoked)
    }

    /// Check if a token identifier has been revoked
    pub async fn is_revoked(&self, jti: &str) -> DatabaseResult<bool> {
        let revoked: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE jti = $1)")
                .bind(jti)
                .fetch_one(&self.pool)
                .await?;

        Ok(revoked)
    }
}
