use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod error;
mod models;
mod push;
mod services;
mod storage;

use config::Config;
use push::{FcmClient, ServiceAccountKey};
use services::notifications::NotificationService;
use storage::{DeviceStore, PgDeviceStore};

const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub devices: Arc<dyn DeviceStore>,
    pub notifications: Arc<NotificationService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "push_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load();
    tracing::info!("Starting server in {} mode", config.server.environment);

    // Initialize database pool
    let db = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database_url())
        .await?;
    tracing::info!("Connected to PostgreSQL");

    // Run migrations
    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("Database migrations completed");

    // Initialize push provider
    let key = ServiceAccountKey::from_file(&config.fcm.credentials_file)?;
    let push = FcmClient::new(key, &config.fcm.endpoint, config.fcm.request_timeout)?;
    tracing::info!(project_id = %push.project_id(), "Initialized FCM client");

    // Create app state
    let devices: Arc<dyn DeviceStore> = Arc::new(PgDeviceStore::new(db));
    let notifications = Arc::new(NotificationService::new(
        devices.clone(),
        Arc::new(push),
        config.fcm.broadcast_topic.clone(),
    ));
    let state = AppState {
        devices,
        notifications,
    };

    // Build router
    let app = api::router::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
