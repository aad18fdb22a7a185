//! Transfer path planning for the Wayfinder router
//!
//! Classifies a validated request into one of the three route kinds (direct,
//! indirect, broker-swap), searches the topology for leg sequences, and
//! assembles the client-side execution material: PFM forward memos and
//! swap-and-action contract payloads.

mod address;
mod memo;
mod paths;
mod planner;

pub use address::*;
pub use memo::*;
pub use paths::*;
pub use planner::*;

use wayfinder_broker::BrokerError;
use wayfinder_topology::DenomError;

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("unknown chain {0:?}")]
    UnknownChain(String),

    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid amount {0:?}: expected a positive integer string")]
    InvalidAmount(String),

    #[error("invalid slippage of {0} bps: must be at most 10000")]
    InvalidSlippage(u32),

    #[error(transparent)]
    Denom(#[from] DenomError),

    #[error("no route from {from} to {to}: {reason}")]
    NoRoute {
        from: String,
        to: String,
        reason: String,
    },

    #[error("broker quote unavailable: {0}")]
    Broker(#[from] BrokerError),
}

impl PlanError {
    /// Whether the error is reported in-band (`success = false` with HTTP
    /// 200) rather than as an invalid-argument RPC error. A valid request
    /// without a route, and a broker outage, are in-band.
    pub fn is_in_band(&self) -> bool {
        matches!(self, PlanError::NoRoute { .. } | PlanError::Broker(_))
    }
}
