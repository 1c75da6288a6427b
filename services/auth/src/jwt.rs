//! JWT service for token generation and validation
//!
//! Tokens are signed with HS256 using the shared secret from
//! [`JwtConfig`]. Every token carries a random `jti` so it can be revoked
//! individually through the revocation ledger.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use lunch_common::config::JwtConfig;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::{error::AuthError, models::Employee};

/// Group membership carried in the `groups` claim
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    /// Account may manage restaurants, menus and employees
    Admin,
    /// Account is active and may order
    Customer,
}

impl Group {
    /// Groups derived from the employee's current flags
    pub fn for_employee(employee: &Employee) -> Vec<Group> {
        let mut groups = Vec::with_capacity(2);
        if employee.is_admin {
            groups.push(Group::Admin);
        }
        if employee.is_active {
            groups.push(Group::Customer);
        }
        groups
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Employee email
    pub sub: String,
    /// Group memberships at issue time
    pub groups: Vec<Group>,
    /// Unique token identifier, used as the revocation key
    pub jti: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
    /// Token type (access or refresh)
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.groups.contains(&Group::Admin)
    }

    /// Reject tokens without the admin group
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden("Admins only!".to_string()))
        }
    }
}

/// Token type enum
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token
    Access,
    /// Refresh token
    Refresh,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Generate an access token for an employee
    pub fn generate_access_token(&self, employee: &Employee) -> Result<String, AuthError> {
        self.issue(employee, TokenType::Access, self.config.access_token_expiry)
    }

    /// Generate a refresh token for an employee
    pub fn generate_refresh_token(&self, employee: &Employee) -> Result<String, AuthError> {
        self.issue(employee, TokenType::Refresh, self.config.refresh_token_expiry)
    }

    fn issue(
        &self,
        employee: &Employee,
        token_type: TokenType,
        ttl: u64,
    ) -> Result<String, AuthError> {
        let now = now_secs();
        let claims = Claims {
            sub: employee.email.clone(),
            groups: Group::for_employee(employee),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
            token_type,
        };
        self.encode_claims(&claims)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::Unauthorized(format!("Invalid token: {}", e)))
    }

    /// Get the access token expiry time
    pub fn access_token_expiry(&self) -> u64 {
        self.config.access_token_expiry
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
