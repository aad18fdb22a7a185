//! Metrics and tracing for the Wayfinder transfer router
//!
//! Prometheus metrics for the RPC surface and the broker client, exposed
//! through the server's `/server/metrics` endpoint, plus tracing
//! initialization shared by the binary and the tests.

pub mod collector;
pub mod metrics;
pub mod tracing;

pub use collector::{MetricsCollector, MetricsError};
pub use tracing::{init_tracing, TracingError};
