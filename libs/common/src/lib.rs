//! Common library for the lunch ordering backend
//!
//! This crate provides shared functionality used across the service crates:
//! layered configuration, database connectivity and migrations, and the
//! persistence error type.
//!
//! ```rust,no_run
//! use lunch_common::{Settings, database::{init_pool, health_check, run_migrations}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load()?;
//!     let pool = init_pool(&settings.database).await?;
//!     run_migrations(&pool).await?;
//!     println!("Database health check: {}", health_check(&pool).await?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;

pub use config::Settings;
