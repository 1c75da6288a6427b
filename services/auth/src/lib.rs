//! Authentication for the lunch ordering backend
//!
//! Token issuing and revocation (`/api/auth/*`), the employee credential
//! store, and the extractors other services use to guard their routes.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod payload;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use error::AuthError;
pub use jwt::{Claims, Group, JwtService, TokenType};
pub use middleware::{AccessClaims, AdminClaims, RefreshClaims};
pub use payload::Payload;
pub use state::AuthState;
