//! Per-chain descriptor schema

use serde::{Deserialize, Serialize};

/// One chain descriptor file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainDescriptor {
    pub chain: ChainSection,

    /// Tokens declared on this chain. Entries carrying `origin_chain` and
    /// `origin_denom` describe routable IBC tokens; the rest are native.
    #[serde(default, rename = "token")]
    pub tokens: Vec<TokenEntry>,

    /// Alternative declaration for received tokens whose on-chain denom is
    /// derived from the hop list instead of being spelled out.
    #[serde(default, rename = "received_token")]
    pub received_tokens: Vec<ReceivedTokenEntry>,
}

/// The `[chain]` section of a descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSection {
    /// Human-readable chain name
    pub name: String,

    /// Chain identifier (e.g. "osmosis-1")
    pub id: String,

    /// Chain type; only "cosmos" is supported
    #[serde(rename = "type")]
    pub chain_type: String,

    /// Key of this chain in the channel registry dataset
    pub registry: String,

    /// Block explorer base URL; hostname must be allow-listed
    pub explorer_url: String,

    /// SLIP-44 coin type
    pub slip44: u32,

    /// Bech32 address prefix (e.g. "osmo")
    pub bech32_prefix: String,

    /// Set when the chain hosts a DEX usable mid-route
    #[serde(default)]
    pub is_broker: bool,

    /// Broker identifier, required when `is_broker`
    #[serde(default)]
    pub broker_id: Option<String>,

    /// Swap-and-action entry point contract, when the broker exposes one
    #[serde(default)]
    pub broker_contract: Option<String>,

    /// Swap venue name passed to the broker contract
    #[serde(default)]
    pub swap_venue: Option<String>,

    /// Tie-break priority among brokers; lower wins
    #[serde(default = "default_broker_priority")]
    pub broker_priority: u32,

    /// Packet Forward Middleware support override; absent means false
    #[serde(default)]
    pub has_pfm: Option<bool>,

    #[serde(default)]
    pub rpcs: Vec<EndpointEntry>,

    #[serde(default)]
    pub rest: Vec<EndpointEntry>,

    /// Wallet configuration metadata, passed through to clients
    #[serde(default)]
    pub wallet: Option<WalletConfig>,
}

/// One RPC or REST endpoint of a chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointEntry {
    pub url: String,
    #[serde(default)]
    pub provider: Option<String>,
}

/// Wallet configuration block of a chain descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Gas price suggestion (e.g. "0.025uosmo")
    pub gas_price: String,

    /// Fee denomination
    pub fee_denom: String,
}

/// One `[[token]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenEntry {
    /// On-chain denom; an IBC hash denom for routable IBC tokens
    pub denom: String,

    /// Display name
    pub name: String,

    pub symbol: String,

    /// Decimal exponent, 0 to 18
    pub exponent: u32,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub coingecko_id: Option<String>,

    /// Destination chains this token may be sent to. Absent means all
    /// connected chains; the single literal "none" makes it non-routable.
    #[serde(default)]
    pub allowed_destinations: Option<Vec<String>>,

    /// Origin chain for routable IBC tokens
    #[serde(default)]
    pub origin_chain: Option<String>,

    /// Base denom on the origin chain for routable IBC tokens
    #[serde(default)]
    pub origin_denom: Option<String>,
}

/// One `[[received_token]]` entry. The on-chain denom is computed from the
/// hop list during enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivedTokenEntry {
    pub origin_denom: String,
    pub origin_chain: String,

    /// Intermediate chains between origin and this chain, traversal order;
    /// empty means the token arrived directly.
    #[serde(default)]
    pub via_chains: Vec<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub display_symbol: Option<String>,

    #[serde(default)]
    pub allowed_destinations: Option<Vec<String>>,
}

impl TokenEntry {
    /// True when the entry declares a routable IBC token rather than a
    /// native one.
    pub fn is_routable_ibc(&self) -> bool {
        self.origin_chain.is_some() || self.origin_denom.is_some()
    }

    /// True when the token is excluded from every outgoing route.
    pub fn is_non_routable(&self) -> bool {
        matches!(
            self.allowed_destinations.as_deref(),
            Some([only]) if only == "none"
        )
    }

    /// Whether this token may be sent to `dest_chain`.
    pub fn allows_destination(&self, dest_chain: &str) -> bool {
        match &self.allowed_destinations {
            None => true,
            Some(list) => !self.is_non_routable() && list.iter().any(|d| d == dest_chain),
        }
    }
}

fn default_broker_priority() -> u32 {
    100
}
