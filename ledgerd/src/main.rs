use ledger_axum::{router, shutdown_signal, start_server};
use ledger_sqlite::{Db, config::SqliteConfig};
use ledgerd::{AppConfig, Cli, impls::LedgerApp};
use std::fs::File;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project. RUST_LOG selects what is written.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    // If requested, dump the schema and exit. The document does not depend on
    // any data, so a throwaway in-memory database is enough.
    if let Some(path) = &cli.schema {
        let db = Db::open(&SqliteConfig::default()).await?;
        let (_, schema) = router(LedgerApp { db: db.clone() }, server);
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        db.close().await;
        return Ok(());
    }

    let db = Db::open(&database).await?;
    tracing::info!(path = ?database.database_path, "ledger database ready");

    let served = start_server(server, LedgerApp { db: db.clone() }, shutdown_signal()).await;

    // Units of work still in flight finish before the pools close.
    db.close().await;
    served?;

    tracing::info!("shut down");
    Ok(())
}
