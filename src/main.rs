//! Wayfinder service entry point
//!
//! Loads the service configuration and chain descriptors, builds the routing
//! topology once, wires the broker quote client with its health-restoration
//! task, and serves the RPC surface until interrupted.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use wayfinder_broker::{QuoteClient, SqsClient};
use wayfinder_config::ServiceConfig;
use wayfinder_metrics::MetricsCollector;
use wayfinder_planner::Planner;
use wayfinder_rpc::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("WAYFINDER_CONFIG").ok();
    let service = ServiceConfig::load(config_path.as_deref().map(Path::new))
        .context("loading service configuration")?;
    service
        .validate()
        .context("validating service configuration")?;

    wayfinder_metrics::init_tracing(&service.log_level, service.log_json)?;

    info!(version = env!("CARGO_PKG_VERSION"), "starting wayfinder");

    let loaded = wayfinder_config::load(&service).context("loading chain descriptors")?;
    let topology =
        Arc::new(wayfinder_topology::build(&loaded).context("building routing topology")?);
    info!(
        chains = topology.chain_ids().len(),
        routes = topology.route_count(),
        "routing topology built"
    );

    let broker = Arc::new(SqsClient::from_settings(&service.broker)?);
    let health_task = broker.spawn_health_task();

    let quotes: Arc<dyn QuoteClient> = broker.clone();
    let planner = Arc::new(Planner::new(topology, quotes));
    let metrics = Arc::new(MetricsCollector::new());
    let state = AppState::new(planner, metrics);

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received");
    };
    wayfinder_rpc::serve(state, &service, shutdown).await?;

    broker.close();
    let _ = health_task.await;
    info!("wayfinder stopped");

    Ok(())
}
