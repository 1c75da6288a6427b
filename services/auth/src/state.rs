//! State shared by the authentication routes and extractors

use sqlx::PgPool;

use crate::{
    jwt::JwtService,
    repositories::{EmployeeRepository, RevokedTokenRepository},
};

/// Authentication state; embed it in a larger state and implement
/// `FromRef` to use the extractors from other services
#[derive(Clone)]
pub struct AuthState {
    pub jwt_service: JwtService,
    pub employees: EmployeeRepository,
    pub revoked_tokens: RevokedTokenRepository,
}

impl AuthState {
    pub fn new(pool: PgPool, jwt_service: JwtService) -> Self {
        Self {
            jwt_service,
            employees: EmployeeRepository::new(pool.clone()),
            revoked_tokens: RevokedTokenRepository::new(pool),
        }
    }
}
