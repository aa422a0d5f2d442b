use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use spopd::backend;
use spopd::commands::CommandLayer;
use spopd::config::Config;
use spopd::logging;
use spopd::model::{Library, LocalQueue};
use spopd::server;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Held until exit so buffered log lines get flushed
    let _log_guard = match logging::init_logging(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!(listen = %config.listen, "=== spopd starting ===");

    let library = Arc::new(Library::new());
    match &config.library {
        Some(path) => {
            backend::spawn_loader(library.clone(), path.clone());
        }
        None => {
            tracing::warn!("No library configured, serving an empty catalog");
            library.set_loaded(true);
        }
    }

    let queue = LocalQueue::new(library.clone());
    let layer = CommandLayer::new(library, queue);

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("binding {}", config.listen))?;

    server::serve(listener, layer, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Could not listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    })
    .await?;

    tracing::info!("spopd shutting down");
    Ok(())
}
