//! Revoked token model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Entry in the append-only revocation ledger
#[derive(Debug, Clone, FromRow)]
pub struct RevokedToken {
    pub id: i32,
    pub jti: String,
    pub blacklisted_on: DateTime<Utc>,
}
