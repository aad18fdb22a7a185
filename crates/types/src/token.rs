use serde::{Deserialize, Serialize};

/// The cross-chain identity of a token: its base denom on the chain where it
/// is native. Two denoms on different chains represent the same token exactly
/// when their identities are equal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenIdentity {
    pub base_denom: String,
    pub origin_chain: String,
}

impl TokenIdentity {
    pub fn new(base_denom: impl Into<String>, origin_chain: impl Into<String>) -> Self {
        Self {
            base_denom: base_denom.into(),
            origin_chain: origin_chain.into(),
        }
    }
}

impl std::fmt::Display for TokenIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.base_denom, self.origin_chain)
    }
}

/// A denom as it appears on one specific chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainDenom {
    pub chain_id: String,
    pub denom: String,
}

/// Token description carried on every route leg.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegToken {
    /// Denom as spelled on the chain the leg departs from.
    pub chain_denom: String,
    pub base_denom: String,
    pub origin_chain: String,
    pub is_native: bool,
}

impl LegToken {
    pub fn identity(&self) -> TokenIdentity {
        TokenIdentity::new(&self.base_denom, &self.origin_chain)
    }
}
