//! Out-of-band bulk reset: wipes every query and form data row in PostgreSQL
//! and inserts the sample form data set.

use anyhow::{bail, Result};
use vial_query_api::config::{AppConfig, StoreBackend};
use vial_query_api::seed::run_seed;
use vial_query_api::{init_logging, PostgresStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.log.level);

    if config.database.backend != StoreBackend::Postgres {
        bail!("Seeding only applies to the postgres backend; the in-memory store seeds via seed.on_startup");
    }

    let store = PostgresStore::new(&config.database_url(), config.database.max_connections).await?;
    store.migrate().await?;

    let summary = run_seed(&store).await?;
    println!(
        "Seed completed: removed {} queries and {} form data entries, created {} form data entries",
        summary.queries_deleted, summary.form_data_deleted, summary.form_data_created
    );

    store.pool().close().await;
    Ok(())
}
