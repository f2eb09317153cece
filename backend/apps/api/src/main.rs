//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::middleware::identify_user;
use auth::presentation::AuthAppState;
use auth::{AuthConfig, PgUserRepository, auth_router};
use axum::{Router, middleware};
use gallery::{GalleryAppState, GalleryConfig, PgGalleryRepository, gallery_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,gallery=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The keyed-hash secret must exist before anything else is built
    let auth_config = AuthConfig::from_env().context("HMAC_KEY must be set")?;
    let gallery_config = GalleryConfig::from_env();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let users = AuthAppState::new(PgUserRepository::new(pool.clone()), auth_config)?;
    let galleries = GalleryAppState::new(
        PgGalleryRepository::new(pool.clone()),
        &gallery_config,
        Arc::clone(&users.config),
    );

    // Build router; identification wraps every route
    let app = Router::new()
        .merge(auth_router(users.clone()))
        .merge(gallery_router(galleries))
        .layer(middleware::from_fn_with_state(
            users,
            identify_user::<PgUserRepository>,
        ))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()
        .context("LISTEN_ADDR must be a socket address")?;
    tracing::info!(
        %addr,
        image_dir = %gallery_config.image_dir.display(),
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
