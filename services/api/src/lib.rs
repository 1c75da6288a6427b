//! Lunch ordering API
//!
//! Restaurants, their weekly menus, the employee directory and the daily
//! choice ledger, served over HTTP/JSON next to the `/api/auth/*` routes.

pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::create_router;
pub use state::AppState;
