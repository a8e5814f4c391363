//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use auth::{AdminSeed, AuthConfig, EdgeGate, ManageUsersUseCase, PgUserRepository, SessionResolver};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use cms::{
    BlobConfig, BulkPolicy, CloudinaryBlobStore, CmsConfig, CmsServices, HttpFileFetcher,
    MailerConfig, PgCmsRepository, ProductionBackend, SmtpMailer, cms_router,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,cms=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

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

    // Configuration
    let auth_config = AuthConfig::from_env()?;
    let cms_config = CmsConfig::from_env()?;
    let mailer_config = MailerConfig::from_env()?;
    let blob_config = BlobConfig::from_env()?;

    let user_repo = PgUserRepository::new(pool.clone());

    // Admin bootstrap; failures should not prevent server startup
    match AdminSeed::from_env() {
        Some(seed) => {
            let use_case =
                ManageUsersUseCase::new(Arc::new(user_repo.clone()), Arc::new(auth_config.clone()));
            if let Err(e) = use_case.ensure_admin(seed).await {
                tracing::warn!(error = %e, "Admin bootstrap failed, continuing anyway");
            }
        }
        None => tracing::debug!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin bootstrap"),
    }

    let mailer = SmtpMailer::new(&mailer_config)?;
    if let Err(e) = mailer.verify().await {
        tracing::warn!(error = %e, "SMTP verification failed, mail delivery may not work");
    }

    let services = CmsServices::<ProductionBackend> {
        repo: PgCmsRepository::new(pool.clone()),
        blobs: CloudinaryBlobStore::new(blob_config)?,
        mailer,
        files: HttpFileFetcher::new()?,
    };
    let bulk = BulkPolicy::from(&mailer_config);
    let resolver = SessionResolver::from_config(&auth_config);
    let gate = EdgeGate::from_config(&auth_config);

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let mut app = Router::new()
        .nest("/api/users", auth::users_router(user_repo, auth_config))
        .nest("/api", cms_router(services, cms_config, bulk, resolver));

    // Admin UI and public pages, when built next to the server
    if let Ok(static_dir) = env::var("STATIC_DIR") {
        tracing::info!(dir = %static_dir, "Serving static files");
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(middleware::from_fn_with_state(gate, auth::edge_gate)),
    );

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:31113".to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
