//! HTTP server for the vendor qualification lookup.
//!
//! Loads the catalog once at startup (a load failure is fatal), then serves
//! the routes in `vendor_qualification::service` until Ctrl+C.

use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;
use vendor_qualification::service::router;
use vendor_qualification::{CatalogStore, QueryContract, ServiceConfig};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        usage(0);
    }

    let mut config = ServiceConfig::from_env()?;
    config.apply_args(args)?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let store = CatalogStore::open(&config.catalog_path)
        .with_context(|| format!("loading catalog {}", config.catalog_path.display()))?;
    let contract = QueryContract::new()?;
    let app = router(Arc::new(store), Arc::new(contract));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!("Vendor Qualification API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: vendor-server [--bind <addr:port>] [--catalog <path>] [--log-level <level>]\n\nEnvironment:\n  VENDOR_BIND_ADDR     default 0.0.0.0:8000\n  VENDOR_CATALOG_PATH  default <repo>/data/vendor_catalog.csv\n  VENDOR_LOG_LEVEL     trace|debug|info|warn|error (default info)\n\nFlags override the environment."
    );
    std::process::exit(code);
}
