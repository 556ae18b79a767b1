// Main entry point - Dependency injection and polling loop setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::application::controller::DashboardController;
use crate::application::surface::ChartSurfaceSet;
use crate::domain::chart::SurfaceKind;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_client::HttpSnapshotClient;
use crate::presentation::status_board::StatusBoard;
use crate::presentation::surfaces::InMemorySurface;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create snapshot client (infrastructure layer)
    let client = Arc::new(HttpSnapshotClient::new(
        config.service.base_url.clone(),
        config.service.series_path.clone(),
    ));

    // Create rendering surfaces (presentation layer)
    let surfaces = ChartSurfaceSet::new(
        SurfaceKind::ALL
            .iter()
            .map(|&kind| (kind, InMemorySurface::new()))
            .collect(),
    );

    // Wire the controller (application layer)
    let controller = DashboardController::new(
        client,
        surfaces,
        StatusBoard::new(),
        Duration::from_secs(config.poll.period_secs),
        config.poll.window_limit,
        config.poll.subject.clone(),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let loop_handle = tokio::spawn(controller.run(shutdown_rx));

    tracing::info!(
        service = %config.service.base_url,
        period_secs = config.poll.period_secs,
        "sleep-telemetry dashboard polling started"
    );

    // Teardown: cancel the loop before the surfaces go away so no cycle
    // applies to a destroyed surface.
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested, cancelling polling loop");
    let _ = shutdown_tx.send(true);
    loop_handle.await?;

    Ok(())
}
