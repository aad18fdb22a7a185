//! RPC surface of the Wayfinder transfer router
//!
//! Every method on `/wayfinder.v1.RouterService/<Method>` is served over
//! three protocols, switched on the request content type: JSON over HTTP
//! (`POST` with a JSON body, `GET` with a `?message=` URL-encoded JSON
//! parameter), binary protobuf (`application/proto`), and gRPC-Web framing
//! (`application/grpc-web[+proto|+json]`). Server reflection is exposed for
//! both common dialects; operational endpoints live under `/server/`.

mod codec;
mod handlers;
mod middleware;
pub mod pb;
mod reflection;
mod server;

pub use handlers::*;
pub use middleware::*;
pub use reflection::*;
pub use server::*;

use std::sync::Arc;
use std::time::Instant;

use wayfinder_metrics::MetricsCollector;
use wayfinder_planner::Planner;

/// Shared state of the RPC surface.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<Planner>,
    pub metrics: Arc<MetricsCollector>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(planner: Arc<Planner>, metrics: Arc<MetricsCollector>) -> Self {
        let topology = planner.topology();
        metrics.set_topology_size(topology.chain_ids().len(), topology.route_count());
        Self {
            planner,
            metrics,
            started_at: Instant::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RpcServerError {
    #[error("failed to bind to address: {0}")]
    BindError(String),

    #[error("server error: {0}")]
    ServerError(String),
}
