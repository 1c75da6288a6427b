//! Repositories for database operations

pub mod employee;
pub mod revoked_token;

pub use employee::EmployeeRepository;
pub use revoked_token::RevokedTokenRepository;
