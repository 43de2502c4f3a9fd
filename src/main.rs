//! ExamHall Server: exam seating allotment service.
//!
//! Main entry point that wires the crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use examhall_api::{AppState, build_app};
use examhall_core::config::{AppConfig, StorageBackend};
use examhall_core::error::AppError;
use examhall_database::{DatabasePool, MemoryDatabase, RepositorySet};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("EXAMHALL_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect the configured storage backend.
async fn connect_storage(
    config: &AppConfig,
) -> Result<(RepositorySet, Option<DatabasePool>), AppError> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            Ok((RepositorySet::postgres(pool.pool().clone()), Some(pool)))
        }
        StorageBackend::Memory => {
            let db = match &config.storage.seed_file {
                Some(path) => MemoryDatabase::load_seed_file(path).await?,
                None => {
                    tracing::warn!("Memory backend started without a seed file; no exams exist");
                    MemoryDatabase::new()
                }
            };
            Ok((RepositorySet::memory(db), None))
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        storage = %config.storage.backend,
        lookahead = config.allotment.lookahead_window,
        "Starting ExamHall"
    );

    let (repos, database) = connect_storage(&config).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, repos, database.clone());
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ExamHall server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = database {
        pool.close().await;
    }

    tracing::info!("ExamHall server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
