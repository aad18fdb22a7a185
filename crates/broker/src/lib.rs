//! Broker quote client for the Wayfinder transfer router
//!
//! Talks to a broker chain's swap quoting service over HTTP. One primary
//! endpoint, any number of backups: requests retry on the current endpoint
//! along a precomputed doubling pause schedule, fail over across probed
//! backups, and a background task restores the primary once it is healthy
//! again.

mod client;
mod mock;
mod retry;
mod sqs;

pub use client::*;
pub use mock::*;
pub use retry::*;
pub use sqs::*;

#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("invalid quote request: {0}")]
    InvalidRequest(String),

    #[error("quote query failed: {0}")]
    QueryFailed(String),

    #[error("all broker endpoints exhausted: {0}")]
    Unavailable(String),
}
