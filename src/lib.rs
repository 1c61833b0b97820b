pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use error::{ApiError, ErrorKind};

// Export all model types
pub use model::*;

// Export store types
pub use store::{InMemoryStore, PostgresStore, Store};

use crate::config::{AppConfig, StoreBackend};
use std::sync::Arc;

/// Initialise `env_logger` with `level` as the default; `RUST_LOG` still wins.
pub fn init_logging(level: &str) {
    use env_logger::{Builder, Env};
    use log::LevelFilter;

    let default_level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    // The server, the seed binary and the test harness may each call this;
    // only the first installs a logger.
    if let Err(e) = Builder::new()
        .filter_level(default_level)
        .filter_module("sqlx", LevelFilter::Warn) // Suppress sqlx Debug logs
        .parse_env(Env::default())
        .try_init()
    {
        log::debug!("Logger already initialised: {}", e);
    }
}

/// Build the configured store and serve until the listener fails.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    match config.database.backend {
        StoreBackend::Postgres => {
            println!("Connecting to PostgreSQL...");
            let store =
                PostgresStore::new(&config.database_url(), config.database.max_connections).await?;

            println!("Running database migrations...");
            store.migrate().await?;

            serve(Arc::new(store), &config).await
        }
        StoreBackend::Memory => {
            log::warn!("Using the in-memory store; data is lost on shutdown");
            serve(Arc::new(InMemoryStore::new()), &config).await
        }
    }
}

pub async fn serve<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    use tokio::net::TcpListener;

    if config.seed.on_startup {
        println!("Loading seed data...");
        let summary = seed::run_seed(&*store).await?;
        println!(
            "Seed data loaded: {} form data entries",
            summary.form_data_created
        );
    }

    let app = routes::build_app(store);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!("Vial query API running on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
