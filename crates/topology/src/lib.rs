//! Routing topology for the Wayfinder transfer router
//!
//! Turns loader output into the immutable in-memory topology the planner and
//! resolver read: chains, the preferred channel per chain pair, and the
//! per-route allowed-token maps. The build runs once at startup; the result
//! is plain data shared behind an `Arc` with no locking on read paths.

mod enrich;
mod model;
mod resolver;

pub use enrich::*;
pub use model::*;
pub use resolver::*;

#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("chain {referenced:?} referenced by {referrer} is not configured")]
    UnknownChainRef { referenced: String, referrer: String },

    #[error("no channel between {from} and {to}, required by received token {denom}")]
    MissingChannel {
        from: String,
        to: String,
        denom: String,
    },
}

/// Errors surfaced while resolving user-supplied denoms.
#[derive(Debug, thiserror::Error)]
pub enum DenomError {
    #[error("unknown chain {0:?}")]
    UnknownChain(String),

    #[error("unknown denom {denom:?} on chain {chain}")]
    UnknownDenom { chain: String, denom: String },

    #[error("token {identity} is not available on {chain}")]
    NotAvailableOnDestination { identity: String, chain: String },
}
