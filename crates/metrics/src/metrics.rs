use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, register_int_gauge,
    HistogramVec, IntCounter, IntCounterVec, IntGauge,
};

lazy_static! {
    /// RPC requests by procedure and outcome
    pub static ref RPC_REQUESTS: IntCounterVec = register_int_counter_vec!(
        "wayfinder_rpc_requests_total",
        "Total RPC requests by procedure and outcome",
        &["procedure", "outcome"]
    )
    .unwrap();

    /// RPC request duration by procedure
    pub static ref RPC_DURATION: HistogramVec = register_histogram_vec!(
        "wayfinder_rpc_duration_seconds",
        "RPC request duration in seconds",
        &["procedure"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0]
    )
    .unwrap();

    /// Broker quote attempts by outcome
    pub static ref BROKER_QUOTES: IntCounterVec = register_int_counter_vec!(
        "wayfinder_broker_quotes_total",
        "Broker quote requests by outcome",
        &["outcome"]
    )
    .unwrap();

    /// Broker endpoint failovers
    pub static ref BROKER_FAILOVERS: IntCounter = register_int_counter!(
        "wayfinder_broker_failovers_total",
        "Broker endpoint failover switches"
    )
    .unwrap();

    /// Chains in the routing topology
    pub static ref TOPOLOGY_CHAINS: IntGauge = register_int_gauge!(
        "wayfinder_topology_chains",
        "Number of chains in the routing topology"
    )
    .unwrap();

    /// Directed routes in the routing topology
    pub static ref TOPOLOGY_ROUTES: IntGauge = register_int_gauge!(
        "wayfinder_topology_routes",
        "Number of directed routes in the routing topology"
    )
    .unwrap();
}
