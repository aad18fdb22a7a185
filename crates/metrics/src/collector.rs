use std::time::Duration;

use prometheus::{Encoder, TextEncoder};

use crate::metrics::*;

/// Metrics recorder for the Wayfinder router.
#[derive(Debug, Default)]
pub struct MetricsCollector;

impl MetricsCollector {
    pub fn new() -> Self {
        Self
    }

    /// Record one RPC request with its outcome.
    pub fn record_request(&self, procedure: &str, outcome: &str, duration: Duration) {
        RPC_REQUESTS.with_label_values(&[procedure, outcome]).inc();
        RPC_DURATION
            .with_label_values(&[procedure])
            .observe(duration.as_secs_f64());
    }

    /// Record a broker quote attempt.
    pub fn record_broker_quote(&self, outcome: &str) {
        BROKER_QUOTES.with_label_values(&[outcome]).inc();
    }

    /// Record a broker endpoint failover switch.
    pub fn record_broker_failover(&self) {
        BROKER_FAILOVERS.inc();
    }

    /// Publish the size of the loaded topology.
    pub fn set_topology_size(&self, chains: usize, routes: usize) {
        TOPOLOGY_CHAINS.set(chains as i64);
        TOPOLOGY_ROUTES.set(routes as i64);
    }

    /// Export all metrics in the Prometheus text exposition format.
    pub fn export_metrics(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let families = prometheus::gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&families, &mut buffer)
            .map_err(|e| MetricsError::EncodeError(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| MetricsError::EncodeError(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("failed to encode metrics: {0}")]
    EncodeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_export() {
        let collector = MetricsCollector::new();
        collector.record_request("FindPath", "ok", Duration::from_millis(12));
        collector.record_broker_quote("ok");
        collector.set_topology_size(5, 12);

        let exported = collector.export_metrics().unwrap();
        assert!(exported.contains("wayfinder_rpc_requests_total"));
        assert!(exported.contains("wayfinder_topology_chains"));
    }
}
