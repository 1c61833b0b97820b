use vial_query_api::config::AppConfig;
use vial_query_api::{init_logging, run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.log.level);

    println!("Vial: Form Data & Query API");
    println!(
        "Configuration loaded: server={}:{} store={:?}",
        config.server.host, config.server.port, config.database.backend
    );

    run_server(config).await
}
