//! IBC channel registry dataset

use serde::{Deserialize, Serialize};

/// One chain-pair entry of the registry dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Registry key of the first chain
    pub chain_1: String,

    /// Registry key of the second chain
    pub chain_2: String,

    pub channels: Vec<RegistryChannel>,
}

/// One channel between a registry pair, described from `chain_1`'s side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryChannel {
    /// Channel id on `chain_1`
    pub channel_id: String,

    #[serde(default = "default_port_id")]
    pub port_id: String,

    /// Channel id on `chain_2`
    pub counterparty_channel_id: String,

    pub connection_id: String,

    #[serde(default)]
    pub tags: ChannelTags,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelTags {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub preferred: bool,
}

impl RegistryChannel {
    /// A channel is usable when it is tagged preferred and its registry
    /// status is ACTIVE or LIVE.
    pub fn is_usable(&self) -> bool {
        if !self.tags.preferred {
            return false;
        }
        matches!(self.tags.status.as_deref(), Some("ACTIVE") | Some("LIVE"))
    }
}

fn default_port_id() -> String {
    "transfer".to_string()
}
