//! `PictoIMS` server binary: configuration, database setup, and serving
//! the REST API.

use dotenvy::dotenv;
use picto_ims::api::{self, AppState};
use picto_ims::config::{database, settings};
use picto_ims::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal; env vars can be set externally)
    dotenv().ok();

    // 3. Load the application settings (file + env overrides)
    let settings = settings::load_default_settings()?;
    info!("Loaded application settings.");

    // 4. Initialize database schema
    let db = database::create_connection(&settings.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;

    // 5. Seed the bootstrap admin on a fresh database
    database::seed_admin_user(&db, &settings)
        .await
        .inspect_err(|e| error!("Failed to seed admin user: {e}"))?;

    // 6. Serve the API
    let bind_addr = settings.bind_addr.clone();
    let app = api::router(AppState::new(db, settings));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
