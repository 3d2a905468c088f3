//! # Server Startup
//!
//! Connect, migrate, seed, then serve the axum app.

use auth::JwtConfig;
use error::{AppError, Result};
use migration::MigratorTrait;
use server::notify::{NotificationDispatcher, Notifier, NoopNotifier, WebhookNotifier};

use crate::config::{jwt_secret, DatabaseConfig, NotifierConfig};

/// Run the API server until the process is stopped.
pub async fn run(host: &str, port: u16) -> Result<()> {
    let db_config = DatabaseConfig::default();

    logging::info!(target: "serve",
        host = %db_config.host,
        port = %db_config.port,
        database = %db_config.database,
        "Connecting to database..."
    );

    let db = migration::connect_to_database(&db_config.url())
        .await
        .map_err(|e| AppError::database(format!("Failed to connect to database: {}", e)))?;

    // Migrations run automatically on startup
    logging::info!(target: "serve", "Running database migrations...");
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| AppError::migration(format!("Migration failed: {}", e)))?;

    let seeded = migration::seeds::run_all_seeds(&db).await?;
    if seeded > 0 {
        logging::info!(target: "serve", rows = %seeded, "Seed data inserted");
    }

    let jwt_config = JwtConfig::new(jwt_secret()?);
    let state = server::AppState::new(db, jwt_config, build_dispatcher(NotifierConfig::from_env()));
    let app = server::create_app_router(state);

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}:{}: {}", host, port, e)))?;

    logging::info!(target: "serve", host = %host, port = %port, "API server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))
}

/// Wire the notification channels; unset webhooks log instead of send.
fn build_dispatcher(config: NotifierConfig) -> NotificationDispatcher {
    let email: Box<dyn Notifier> = match config.email_webhook {
        Some(url) => Box::new(WebhookNotifier::new(url, "email")),
        None => Box::new(NoopNotifier),
    };
    let sms: Box<dyn Notifier> = match config.sms_webhook {
        Some(url) => Box::new(WebhookNotifier::new(url, "sms")),
        None => Box::new(NoopNotifier),
    };

    NotificationDispatcher::new(email, sms)
}
