//! In-memory topology model

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use wayfinder_types::TokenIdentity;

/// The routing topology: every configured chain with its channels and the
/// tokens each channel may carry. Built once at startup, then read-only.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    pub(crate) chains: Vec<ChainNode>,
    pub(crate) by_id: HashMap<String, usize>,
    pub(crate) by_registry: HashMap<String, usize>,
    /// Where each token identity lives: identity -> chain id -> chain denom.
    pub(crate) identity_index: HashMap<TokenIdentity, BTreeMap<String, String>>,
}

/// One chain of the topology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainNode {
    pub id: String,
    pub name: String,
    pub registry: String,
    pub slip44: u32,
    pub bech32_prefix: String,
    pub explorer_url: String,
    pub has_pfm: bool,
    pub is_broker: bool,
    pub broker_id: Option<String>,
    pub broker_contract: Option<String>,
    pub swap_venue: Option<String>,
    pub broker_priority: u32,
    pub rpcs: Vec<Endpoint>,
    pub rest: Vec<Endpoint>,
    pub wallet: Option<WalletInfo>,
    /// Native tokens keyed by on-chain denom.
    pub native_tokens: BTreeMap<String, NativeToken>,
    /// IBC tokens present on this chain keyed by on-chain denom: tokens
    /// received from every directly connected chain plus declared routable
    /// tokens.
    pub ibc_tokens: BTreeMap<String, IbcToken>,
    /// Outgoing routes, one per connected peer.
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub url: String,
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletInfo {
    pub gas_price: String,
    pub fee_denom: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeToken {
    pub denom: String,
    pub name: String,
    pub symbol: String,
    pub exponent: u32,
    pub icon: Option<String>,
    pub coingecko_id: Option<String>,
    pub allowed_destinations: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbcToken {
    pub denom: String,
    pub base_denom: String,
    pub origin_chain: String,
    /// Trace path as recorded on this chain; empty when not reconstructable.
    pub path: String,
    /// Declared routable onward via the descriptor.
    pub routable: bool,
    pub allowed_destinations: Option<Vec<String>>,
    pub display_name: Option<String>,
    pub display_symbol: Option<String>,
}

/// A directed transport to one peer chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub to_chain: String,
    pub channel_id: String,
    pub port_id: String,
    pub connection_id: String,
    pub counterparty_channel_id: String,
    /// Tokens this route carries, keyed by denom on the sending chain.
    pub allowed_tokens: BTreeMap<String, AllowedToken>,
}

/// One entry of a route's allowed-token map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowedToken {
    /// Denom the token arrives as on the destination chain.
    pub dest_denom: String,
    pub base_denom: String,
    pub origin_chain: String,
}

impl AllowedToken {
    pub fn identity(&self) -> TokenIdentity {
        TokenIdentity::new(&self.base_denom, &self.origin_chain)
    }
}

impl IbcToken {
    pub fn identity(&self) -> TokenIdentity {
        TokenIdentity::new(&self.base_denom, &self.origin_chain)
    }

    pub fn allows_destination(&self, dest_chain: &str) -> bool {
        match &self.allowed_destinations {
            None => true,
            Some(list) => {
                !matches!(list.as_slice(), [only] if only == "none")
                    && list.iter().any(|d| d == dest_chain)
            }
        }
    }
}

impl Topology {
    pub fn chain(&self, chain_id: &str) -> Option<&ChainNode> {
        self.by_id.get(chain_id).map(|&idx| &self.chains[idx])
    }

    pub fn chain_by_registry(&self, registry: &str) -> Option<&ChainNode> {
        self.by_registry.get(registry).map(|&idx| &self.chains[idx])
    }

    pub fn chains(&self) -> impl Iterator<Item = &ChainNode> {
        self.chains.iter()
    }

    pub fn chain_ids(&self) -> Vec<String> {
        self.chains.iter().map(|c| c.id.clone()).collect()
    }

    pub fn route(&self, from_chain: &str, to_chain: &str) -> Option<&Route> {
        self.chain(from_chain)?
            .routes
            .iter()
            .find(|r| r.to_chain == to_chain)
    }

    /// Chains hosting brokers, in a stable order.
    pub fn brokers(&self) -> Vec<&ChainNode> {
        let mut brokers: Vec<_> = self
            .chains
            .iter()
            .filter(|c| c.is_broker && c.broker_id.is_some())
            .collect();
        brokers.sort_by(|a, b| {
            a.broker_priority
                .cmp(&b.broker_priority)
                .then_with(|| a.id.cmp(&b.id))
        });
        brokers
    }

    pub fn route_count(&self) -> usize {
        self.chains.iter().map(|c| c.routes.len()).sum()
    }
}

impl ChainNode {
    pub fn route_to(&self, to_chain: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.to_chain == to_chain)
    }
}
