//! Authentication service models

pub mod employee;
pub mod revoked_token;

// Re-export for convenience
pub use employee::{Employee, LoginCredentials, NewEmployee, RegistrationRequest};
pub use revoked_token::RevokedToken;
