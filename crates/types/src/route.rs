use serde::{Deserialize, Serialize};

use crate::LegToken;

/// A transfer planning request as accepted on the wire.
///
/// Amounts are decimal integer strings in the token's minimal unit. Denoms
/// accept either the literal on-chain spelling or `base_denom@origin_chain`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub chain_from: String,
    pub token_from_denom: String,
    pub amount_in: String,
    pub chain_to: String,
    #[serde(default)]
    pub token_to_denom: Option<String>,
    pub sender: String,
    pub receiver: String,
    #[serde(default)]
    pub smart_route: bool,
    #[serde(default)]
    pub slippage_bps: Option<u32>,
}

/// One IBC transfer hop of a route, source to destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Leg {
    pub from_chain: String,
    pub to_chain: String,
    pub channel: String,
    pub port: String,
    pub token: LegToken,
    pub amount: String,
}

/// The plan produced for a routable request. Exactly one variant is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePlan {
    Direct(DirectRoute),
    Indirect(IndirectRoute),
    BrokerSwap(BrokerSwapRoute),
}

/// A single-hop IBC transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectRoute {
    pub transfer: Leg,
}

/// A multi-hop IBC transfer of one token identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndirectRoute {
    /// Chains traversed, source first, destination last.
    pub path: Vec<String>,
    pub legs: Vec<Leg>,
    /// True when every intermediate chain runs Packet Forward Middleware, in
    /// which case the whole sequence collapses into one outgoing transfer.
    pub supports_pfm: bool,
    pub pfm_start_chain: String,
    /// Nested `forward` memo to attach to the first transfer when
    /// `supports_pfm` holds.
    #[serde(default)]
    pub pfm_memo: Option<String>,
}

/// A route that crosses a broker chain where a DEX swap changes the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerSwapRoute {
    /// Anchor chains of the route: source, broker, destination (deduplicated).
    pub path: Vec<String>,
    pub inbound_legs: Vec<Leg>,
    pub swap: SwapQuote,
    pub outbound_legs: Vec<Leg>,
    pub outbound_supports_pfm: bool,
    pub execution: Execution,
}

/// A swap quote obtained from a broker chain's quoting service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapQuote {
    /// Broker identifier, discriminates the `detail` payload.
    pub broker: String,
    /// Chain the swap executes on.
    pub chain_id: String,
    pub denom_in: String,
    pub denom_out: String,
    pub amount_in: String,
    pub amount_out: String,
    #[serde(default)]
    pub price_impact: Option<String>,
    /// Unix seconds at which the quote was obtained. Quotes drift; clients
    /// derive the age from this and refresh before execution.
    pub quoted_at: u64,
    pub detail: BrokerQuote,
}

/// Broker-specific quote internals. Each supported broker contributes one
/// variant; clients switch on `SwapQuote::broker`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokerQuote {
    Sqs(SqsQuote),
}

/// Quote internals from a sidecar query server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqsQuote {
    pub routes: Vec<SqsRoute>,
    #[serde(default)]
    pub effective_fee: Option<String>,
}

/// One candidate route inside an SQS quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqsRoute {
    pub pools: Vec<SqsPool>,
    pub in_amount: String,
    pub out_amount: String,
    /// Aggregate liquidity across the route's pools.
    #[serde(default)]
    pub effective_liquidity: Option<String>,
    /// Set when the requested amount exceeds what the route can absorb.
    #[serde(default)]
    pub overflows: bool,
}

/// One pool hop inside an SQS route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqsPool {
    pub id: u64,
    #[serde(default)]
    pub pool_type: Option<String>,
    #[serde(default)]
    pub spread_factor: Option<String>,
    #[serde(default)]
    pub taker_fee: Option<String>,
    pub token_out_denom: String,
    #[serde(default)]
    pub liquidity_cap: Option<String>,
}

/// Client-side execution material for a broker-swap route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    /// True when the plan drives the broker's swap contract (smart mode).
    pub uses_wasm: bool,
    /// `amount_out` reduced by the slippage tolerance.
    pub min_output_amount: String,
    pub slippage_bps: u32,
    /// Sender address rewritten to the broker chain's prefix, for fund
    /// recovery when a downstream step fails.
    #[serde(default)]
    pub recover_address: Option<String>,
    /// JSON memo to attach to the inbound transfer in smart mode with
    /// inbound legs present.
    #[serde(default)]
    pub memo: Option<String>,
    /// Prebuilt contract call when the user signs directly on the broker
    /// chain in smart mode.
    #[serde(default)]
    pub smart_contract_data: Option<SmartContractData>,
}

/// A contract execution the client signs on the broker chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartContractData {
    pub chain_id: String,
    pub contract: String,
    pub msg: serde_json::Value,
}

impl RoutePlan {
    /// Chains the route traverses, source first.
    pub fn path(&self) -> Vec<String> {
        match self {
            RoutePlan::Direct(d) => {
                vec![d.transfer.from_chain.clone(), d.transfer.to_chain.clone()]
            }
            RoutePlan::Indirect(i) => i.path.clone(),
            RoutePlan::BrokerSwap(b) => b.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg() -> Leg {
        Leg {
            from_chain: "osmosis-1".to_string(),
            to_chain: "cosmoshub-4".to_string(),
            channel: "channel-0".to_string(),
            port: "transfer".to_string(),
            token: LegToken {
                chain_denom: "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2"
                    .to_string(),
                base_denom: "uatom".to_string(),
                origin_chain: "cosmoshub-4".to_string(),
                is_native: false,
            },
            amount: "100000".to_string(),
        }
    }

    #[test]
    fn test_route_plan_serializes_tagged() {
        let plan = RoutePlan::Direct(DirectRoute { transfer: leg() });
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("direct").is_some());
        assert_eq!(json["direct"]["transfer"]["channel"], "channel-0");
    }

    #[test]
    fn test_route_plan_path() {
        let plan = RoutePlan::Direct(DirectRoute { transfer: leg() });
        assert_eq!(plan.path(), vec!["osmosis-1", "cosmoshub-4"]);
    }

    #[test]
    fn test_route_request_optional_fields() {
        let req: RouteRequest = serde_json::from_str(
            r#"{
                "chain_from": "osmosis-1",
                "token_from_denom": "uosmo",
                "amount_in": "1000000",
                "chain_to": "cosmoshub-4",
                "sender": "osmo1abc",
                "receiver": "cosmos1abc"
            }"#,
        )
        .unwrap();
        assert!(req.token_to_denom.is_none());
        assert!(!req.smart_route);
        assert!(req.slippage_bps.is_none());
    }
}
