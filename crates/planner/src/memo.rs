//! Wire memo assembly
//!
//! Two memo families leave the planner: the nested Packet Forward Middleware
//! `forward` memo for multi-hop transfers, and the `wasm` envelope carrying a
//! `swap_and_action` message for the broker's swap entry-point contract.

use serde::{Deserialize, Serialize};

/// Forwarding retries requested from the middleware on each hop.
const PFM_RETRIES: u32 = 2;

/// One forward instruction: executed on the chain that receives the packet,
/// sending it onward over `channel` to `receiver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfmHop {
    pub receiver: String,
    pub port: String,
    pub channel: String,
}

/// Build the nested PFM memo for a hop sequence. Returns `None` for an empty
/// sequence (a plain transfer needs no memo).
pub fn build_pfm_memo(hops: &[PfmHop]) -> Option<String> {
    fn build_nested(hops: &[PfmHop], index: usize) -> serde_json::Value {
        let hop = &hops[index];
        let mut forward = serde_json::json!({
            "receiver": hop.receiver,
            "port": hop.port,
            "channel": hop.channel,
            "retries": PFM_RETRIES,
        });

        if index + 1 < hops.len() {
            forward["next"] = build_nested(hops, index + 1);
        }

        serde_json::json!({ "forward": forward })
    }

    if hops.is_empty() {
        return None;
    }
    Some(build_nested(hops, 0).to_string())
}

/// Execute message understood by the broker's swap-and-action contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapAndActionMsg {
    pub swap_and_action: SwapAndAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapAndAction {
    pub user_swap: UserSwap,
    /// Minimum acceptable output; the contract aborts below it.
    pub min_asset: AssetSpec,
    /// Deadline in nanoseconds since the epoch.
    pub timeout_timestamp: u64,
    pub post_swap_action: PostSwapAction,
    pub affiliates: Vec<Affiliate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSwap {
    SwapExactAssetIn {
        swap_venue_name: String,
        operations: Vec<SwapOperation>,
    },
}

/// One pool hop of the swap route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapOperation {
    pub denom_in: String,
    pub denom_out: String,
    pub pool: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetSpec {
    Native { amount: String, denom: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostSwapAction {
    /// Bank send on the broker chain itself.
    Transfer { to_address: String },
    /// IBC transfer out of the broker chain, optionally carrying a nested
    /// forward memo for the hops after the first.
    IbcTransfer { ibc_transfer: IbcTransferAction },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbcTransferAction {
    pub ibc_info: IbcInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbcInfo {
    /// Memo attached to the outgoing transfer; empty when the first outbound
    /// leg is also the last.
    pub memo: String,
    pub receiver: String,
    pub recover_address: String,
    pub source_channel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Affiliate {
    pub address: String,
    pub basis_points_fee: String,
}

/// Wrap a swap-and-action message in the `wasm` hook envelope interpreted by
/// the broker chain when it receives the inbound transfer.
pub fn wasm_envelope(contract: &str, msg: &SwapAndActionMsg) -> serde_json::Value {
    serde_json::json!({
        "wasm": {
            "contract": contract,
            "msg": msg,
        }
    })
}
