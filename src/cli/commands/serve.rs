//! Serve command: run the HTTP API until interrupted

use super::shared::{load_configuration, open_service};
use crate::cli::args::{GlobalArgs, ServeArgs};
use crate::http;
use anyhow::Context;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn run_serve(
    global: &GlobalArgs,
    args: ServeArgs,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let mut config = load_configuration(global)?;
    if let Some(bind) = args.bind_address {
        config.server.bind_address = bind;
    }
    let bind_address = config.server.bind_address.clone();

    let service = Arc::new(open_service(config)?);
    http::serve(Arc::clone(&service), &bind_address, shutdown)
        .await
        .context("HTTP server failed")?;

    // Final snapshot so nothing committed since the last write is lost
    if let Some(dir) = service.data_dir() {
        service
            .save_snapshot(dir)
            .await
            .context("Failed to write final snapshot")?;
        info!("Final snapshot written to {}", dir.display());
    }
    Ok(())
}
