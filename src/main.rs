use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use staffbook_api::api::{router, AppState};
use staffbook_api::auth::jwt::TokenCodec;
use staffbook_api::auth::password::BcryptHasher;
use staffbook_api::config::Config;
use staffbook_api::infrastructure::repositories::Repositories;
use staffbook_api::services::Services;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(environment = %config.environment, "configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database connected and migrated");

    let tokens = Arc::new(TokenCodec::new(&config.token));
    let services = Services::new(
        Repositories::postgres(pool),
        Arc::new(BcryptHasher::new(config.bcrypt_cost)),
        tokens.clone(),
    );
    let app = router(AppState::new(services, tokens));

    // Start server
    tracing::info!("Server listening on {}", config.server_addr);
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
