use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::info;

use todo_api::{router, AppState};
use todo_infrastructure::{
    create_pg_pool, create_sqlite_pool, migrate_postgres, migrate_sqlite, DatabaseBackend,
    PgTaskStore, PgUserRepository, SqliteTaskStore, SqliteUserRepository,
};
use todo_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    todo_shared::telemetry::init_telemetry();

    info!("Todo server starting...");

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Connect, migrate and wire the backend named by the database URL
    let backend = DatabaseBackend::from_url(&config.database.url)
        .ok_or_else(|| anyhow!("unsupported database url scheme"))?;
    info!("Connecting to {} database...", backend.as_str());

    let app = match backend {
        DatabaseBackend::Postgres => {
            let pool = create_pg_pool(&config.database).await?;
            migrate_postgres(&pool).await?;
            let users = Arc::new(PgUserRepository::new(pool.clone()));
            router(AppState::new(pool, PgTaskStore::new(), users, config.session.clone()))
        }
        DatabaseBackend::Sqlite => {
            let pool = create_sqlite_pool(&config.database).await?;
            migrate_sqlite(&pool).await?;
            let users = Arc::new(SqliteUserRepository::new(pool.clone()));
            router(AppState::new(pool, SqliteTaskStore::new(), users, config.session.clone()))
        }
    };
    info!("Database connection established.");

    let app: Router = app.layer(
        TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default().include_headers(false)),
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Todo server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
