use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lunch_api::{AppState, create_router};
use lunch_auth::JwtService;
use lunch_common::{
    Settings,
    database::{health_check, init_pool, run_migrations},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting lunch API service");

    let settings = Settings::load()?;

    // Initialize database connection pool
    let pool = init_pool(&settings.database).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    let state = AppState::new(pool, JwtService::new(settings.jwt.clone()));
    let app = create_router(state, &settings.build_version);

    let address = settings.server.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Lunch API listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
