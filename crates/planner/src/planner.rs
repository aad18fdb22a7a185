//! Route classification and plan assembly

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::debug;
use wayfinder_broker::{Quote, QuoteClient, QuoteRequest};
use wayfinder_topology::{ChainNode, Topology};
use wayfinder_types::{
    BrokerQuote, BrokerSwapRoute, DirectRoute, Execution, IndirectRoute, Leg, LegToken,
    RoutePlan, RouteRequest, SmartContractData, SwapQuote, TokenIdentity, DEFAULT_SLIPPAGE_BPS,
};

use crate::{
    build_pfm_memo, rewrite_prefix, validate_address, wasm_envelope, AssetSpec, Hop, IbcInfo,
    IbcTransferAction, PfmHop, PlanError, PostSwapAction, SwapAndAction, SwapAndActionMsg,
    SwapOperation, UserSwap, find_token_path,
};

/// Path search depth cap; routes this long are not worth executing.
const MAX_PATH_HOPS: usize = 6;

/// Validity window of a swap-and-action payload.
const SWAP_TIMEOUT: Duration = Duration::from_secs(300);

/// The path planner. Reads the immutable topology and consults the broker
/// quote client for swap routes; holds no mutable state of its own.
pub struct Planner {
    topology: Arc<Topology>,
    quotes: Arc<dyn QuoteClient>,
}

struct BrokerCandidate<'a> {
    node: &'a ChainNode,
    inbound: Vec<Hop>,
    outbound: Vec<Hop>,
    denom_in: String,
    denom_out: String,
}

impl Planner {
    pub fn new(topology: Arc<Topology>, quotes: Arc<dyn QuoteClient>) -> Self {
        Self { topology, quotes }
    }

    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// Compute an executable plan for a transfer request.
    pub async fn find_path(&self, request: &RouteRequest) -> Result<RoutePlan, PlanError> {
        let from = self
            .topology
            .chain(&request.chain_from)
            .ok_or_else(|| PlanError::UnknownChain(request.chain_from.clone()))?;
        let to = self
            .topology
            .chain(&request.chain_to)
            .ok_or_else(|| PlanError::UnknownChain(request.chain_to.clone()))?;

        validate_address(&request.sender, &from.bech32_prefix)?;
        validate_address(&request.receiver, &to.bech32_prefix)?;
        let amount = parse_amount(&request.amount_in)?;

        let slippage_bps = request.slippage_bps.unwrap_or(DEFAULT_SLIPPAGE_BPS);
        if slippage_bps > 10_000 {
            return Err(PlanError::InvalidSlippage(slippage_bps));
        }

        let resolved_from = self
            .topology
            .resolve_to_chain_denom(&request.chain_from, &request.token_from_denom)?;
        let resolved_to = match request.token_to_denom.as_deref() {
            Some(input) if !input.is_empty() => self.topology.resolve_destination_denom(
                &request.chain_from,
                &request.chain_to,
                input,
            )?,
            _ => self.topology.infer_token_to_denom(
                &request.chain_from,
                &resolved_from,
                &request.chain_to,
            )?,
        };

        let (from_identity, _) = self
            .topology
            .identity_of(&request.chain_from, &resolved_from)
            .expect("resolved denom must have an identity");
        let (to_identity, _) = self
            .topology
            .identity_of(&request.chain_to, &resolved_to)
            .expect("resolved denom must have an identity");

        debug!(
            from = %request.chain_from,
            to = %request.chain_to,
            from_identity = %from_identity,
            to_identity = %to_identity,
            "classifying transfer request"
        );

        if from_identity == to_identity {
            self.plan_transfer(request, &from_identity, &resolved_from, amount)
        } else {
            self.plan_broker_swap(
                request,
                &from_identity,
                &to_identity,
                &resolved_from,
                amount,
                slippage_bps,
            )
            .await
        }
    }

    /// Plan a same-identity transfer: direct when one channel carries it,
    /// indirect over the shortest token-compatible path otherwise.
    fn plan_transfer(
        &self,
        request: &RouteRequest,
        identity: &TokenIdentity,
        resolved_from: &str,
        amount: u128,
    ) -> Result<RoutePlan, PlanError> {
        if request.chain_from == request.chain_to {
            return Err(PlanError::NoRoute {
                from: request.chain_from.clone(),
                to: request.chain_to.clone(),
                reason: "source and destination are the same chain and token".to_string(),
            });
        }

        let hops = find_token_path(
            &self.topology,
            &request.chain_from,
            resolved_from,
            identity,
            &request.chain_to,
            MAX_PATH_HOPS,
        )
        .ok_or_else(|| PlanError::NoRoute {
            from: request.chain_from.clone(),
            to: request.chain_to.clone(),
            reason: format!("no IBC path carries {identity}"),
        })?;

        let legs = self.hops_to_legs(&hops, identity, amount);

        if legs.len() == 1 {
            return Ok(RoutePlan::Direct(DirectRoute {
                transfer: legs.into_iter().next().expect("one leg"),
            }));
        }

        let mut path = vec![request.chain_from.clone()];
        path.extend(hops.iter().map(|h| h.to_chain.clone()));

        let supports_pfm = self.intermediates_support_pfm(&path);
        let pfm_memo = if supports_pfm {
            build_pfm_memo(&self.forward_hops(&legs[1..], &request.receiver)?)
        } else {
            None
        };

        Ok(RoutePlan::Indirect(IndirectRoute {
            path,
            legs,
            supports_pfm,
            pfm_start_chain: request.chain_from.clone(),
            pfm_memo,
        }))
    }

    /// Plan a route through a broker chain with a mid-flight swap.
    async fn plan_broker_swap(
        &self,
        request: &RouteRequest,
        from_identity: &TokenIdentity,
        to_identity: &TokenIdentity,
        resolved_from: &str,
        amount: u128,
        slippage_bps: u32,
    ) -> Result<RoutePlan, PlanError> {
        let broker = self
            .select_broker(request, from_identity, to_identity, resolved_from)
            .ok_or_else(|| PlanError::NoRoute {
                from: request.chain_from.clone(),
                to: request.chain_to.clone(),
                reason: format!("no broker can swap {from_identity} into {to_identity}"),
            })?;

        let mut quote_request =
            QuoteRequest::exact_in(amount.to_string(), &broker.denom_in, &broker.denom_out);
        if request.smart_route {
            quote_request = quote_request.with_single_route();
        }
        let quote = self.quotes.quote(&quote_request).await?;

        let amount_out: u128 = quote
            .amount_out
            .parse()
            .map_err(|_| PlanError::InvalidAmount(quote.amount_out.clone()))?;
        let min_output = amount_out * u128::from(10_000 - slippage_bps) / 10_000;

        let inbound_legs = self.hops_to_legs(&broker.inbound, from_identity, amount);
        let outbound_legs = self.hops_to_legs(&broker.outbound, to_identity, amount_out);

        let mut outbound_path = vec![broker.node.id.clone()];
        outbound_path.extend(broker.outbound.iter().map(|h| h.to_chain.clone()));
        let outbound_supports_pfm = self.intermediates_support_pfm(&outbound_path);

        let mut path = vec![request.chain_from.clone()];
        if broker.node.id != request.chain_from {
            path.push(broker.node.id.clone());
        }
        if request.chain_to != *path.last().expect("path is non-empty") {
            path.push(request.chain_to.clone());
        }

        let execution = self.build_execution(
            request,
            broker.node,
            &inbound_legs,
            &outbound_legs,
            outbound_supports_pfm,
            &quote,
            slippage_bps,
            &min_output.to_string(),
        )?;

        let swap = SwapQuote {
            broker: broker
                .node
                .broker_id
                .clone()
                .expect("broker chains carry an id"),
            chain_id: broker.node.id.clone(),
            denom_in: quote.denom_in.clone(),
            denom_out: quote.denom_out.clone(),
            amount_in: quote.amount_in.clone(),
            amount_out: quote.amount_out.clone(),
            price_impact: quote.price_impact.clone(),
            quoted_at: unix_now_secs(),
            detail: quote.detail.clone(),
        };

        Ok(RoutePlan::BrokerSwap(BrokerSwapRoute {
            path,
            inbound_legs,
            swap,
            outbound_legs,
            outbound_supports_pfm,
            execution,
        }))
    }

    /// Pick the broker serving a swap: fewest total IBC hops first, then the
    /// configured broker priority, then chain id. `Topology::brokers` already
    /// yields priority order, so the first minimum wins.
    fn select_broker(
        &self,
        request: &RouteRequest,
        from_identity: &TokenIdentity,
        to_identity: &TokenIdentity,
        resolved_from: &str,
    ) -> Option<BrokerCandidate<'_>> {
        let mut candidates = Vec::new();

        for node in self.topology.brokers() {
            let Some(denom_in) = self.topology.denom_on(&node.id, from_identity) else {
                continue;
            };
            let Some(denom_out) = self.topology.denom_on(&node.id, to_identity) else {
                continue;
            };

            let Some(inbound) = find_token_path(
                &self.topology,
                &request.chain_from,
                resolved_from,
                from_identity,
                &node.id,
                MAX_PATH_HOPS,
            ) else {
                continue;
            };
            let Some(outbound) = find_token_path(
                &self.topology,
                &node.id,
                &denom_out,
                to_identity,
                &request.chain_to,
                MAX_PATH_HOPS,
            ) else {
                continue;
            };

            candidates.push(BrokerCandidate {
                node,
                inbound,
                outbound,
                denom_in,
                denom_out,
            });
        }

        candidates
            .into_iter()
            .min_by_key(|c| c.inbound.len() + c.outbound.len())
    }

    #[allow(clippy::too_many_arguments)]
    fn build_execution(
        &self,
        request: &RouteRequest,
        broker: &ChainNode,
        inbound_legs: &[Leg],
        outbound_legs: &[Leg],
        outbound_supports_pfm: bool,
        quote: &Quote,
        slippage_bps: u32,
        min_output: &str,
    ) -> Result<Execution, PlanError> {
        let recover_address = rewrite_prefix(&request.sender, &broker.bech32_prefix)?;

        let mut execution = Execution {
            uses_wasm: false,
            min_output_amount: min_output.to_string(),
            slippage_bps,
            recover_address: Some(recover_address.clone()),
            memo: None,
            smart_contract_data: None,
        };

        let smart_available = broker.broker_contract.is_some() && broker.swap_venue.is_some();
        if !request.smart_route || !smart_available {
            return Ok(execution);
        }
        // A multi-leg outbound path only collapses into one contract action
        // when the chains after the broker forward packets.
        if outbound_legs.len() > 1 && !outbound_supports_pfm {
            return Ok(execution);
        }

        let contract = broker.broker_contract.as_deref().expect("checked above");
        let venue = broker.swap_venue.as_deref().expect("checked above");

        let post_swap_action = if outbound_legs.is_empty() {
            PostSwapAction::Transfer {
                to_address: request.receiver.clone(),
            }
        } else {
            let first = &outbound_legs[0];
            let receiver = self.receiver_on(&first.to_chain, &request.chain_to, &request.receiver)?;
            let inner_memo = build_pfm_memo(&self.forward_hops(&outbound_legs[1..], &request.receiver)?)
                .unwrap_or_default();
            PostSwapAction::IbcTransfer {
                ibc_transfer: IbcTransferAction {
                    ibc_info: IbcInfo {
                        memo: inner_memo,
                        receiver,
                        recover_address,
                        source_channel: first.channel.clone(),
                    },
                },
            }
        };

        let msg = SwapAndActionMsg {
            swap_and_action: SwapAndAction {
                user_swap: UserSwap::SwapExactAssetIn {
                    swap_venue_name: venue.to_string(),
                    operations: swap_operations(quote),
                },
                min_asset: AssetSpec::Native {
                    amount: min_output.to_string(),
                    denom: quote.denom_out.clone(),
                },
                timeout_timestamp: swap_timeout_ns(),
                post_swap_action,
                affiliates: vec![],
            },
        };

        if inbound_legs.is_empty() {
            // The user signs the contract call on the broker chain directly.
            execution.smart_contract_data = Some(SmartContractData {
                chain_id: broker.id.clone(),
                contract: contract.to_string(),
                msg: serde_json::to_value(&msg).expect("swap message serializes"),
            });
            execution.uses_wasm = true;
        } else if !outbound_legs.is_empty() {
            // The inbound transfer targets the contract and carries the whole
            // action as a wasm hook memo.
            execution.memo = Some(wasm_envelope(contract, &msg).to_string());
            execution.uses_wasm = true;
        }

        Ok(execution)
    }

    fn hops_to_legs(&self, hops: &[Hop], identity: &TokenIdentity, amount: u128) -> Vec<Leg> {
        hops.iter()
            .map(|hop| Leg {
                from_chain: hop.from_chain.clone(),
                to_chain: hop.to_chain.clone(),
                channel: hop.channel_id.clone(),
                port: hop.port_id.clone(),
                token: LegToken {
                    chain_denom: hop.denom_on_from.clone(),
                    base_denom: identity.base_denom.clone(),
                    origin_chain: identity.origin_chain.clone(),
                    is_native: identity.origin_chain == hop.from_chain,
                },
                amount: amount.to_string(),
            })
            .collect()
    }

    /// Forward instructions for the legs after the first transfer. Each
    /// forward executes on the leg's source chain; its receiver lives on the
    /// leg's destination, so intermediate receivers are the final receiver
    /// rewritten to that chain's prefix.
    fn forward_hops(&self, legs: &[Leg], receiver: &str) -> Result<Vec<PfmHop>, PlanError> {
        let Some(last) = legs.last() else {
            return Ok(Vec::new());
        };
        legs.iter()
            .map(|leg| {
                let hop_receiver = if leg.to_chain == last.to_chain {
                    receiver.to_string()
                } else {
                    self.receiver_on(&leg.to_chain, &last.to_chain, receiver)?
                };
                Ok(PfmHop {
                    receiver: hop_receiver,
                    port: leg.port.clone(),
                    channel: leg.channel.clone(),
                })
            })
            .collect()
    }

    fn receiver_on(
        &self,
        chain_id: &str,
        final_chain: &str,
        receiver: &str,
    ) -> Result<String, PlanError> {
        if chain_id == final_chain {
            return Ok(receiver.to_string());
        }
        let chain = self
            .topology
            .chain(chain_id)
            .ok_or_else(|| PlanError::UnknownChain(chain_id.to_string()))?;
        rewrite_prefix(receiver, &chain.bech32_prefix)
    }

    /// PFM support of a path: the logical AND over the strict intermediates.
    /// Source and destination sign or receive normally and need no
    /// forwarding support.
    fn intermediates_support_pfm(&self, path: &[String]) -> bool {
        if path.len() <= 2 {
            return true;
        }
        path[1..path.len() - 1].iter().all(|chain_id| {
            self.topology
                .chain(chain_id)
                .map(|c| c.has_pfm)
                .unwrap_or(false)
        })
    }
}

/// Swap operations for the contract call, taken from the quote's best route.
fn swap_operations(quote: &Quote) -> Vec<SwapOperation> {
    let BrokerQuote::Sqs(detail) = &quote.detail;
    let Some(route) = detail.routes.first() else {
        return Vec::new();
    };

    let mut denom_in = quote.denom_in.clone();
    route
        .pools
        .iter()
        .map(|pool| {
            let op = SwapOperation {
                denom_in: denom_in.clone(),
                denom_out: pool.token_out_denom.clone(),
                pool: pool.id.to_string(),
            };
            denom_in = pool.token_out_denom.clone();
            op
        })
        .collect()
}

fn parse_amount(input: &str) -> Result<u128, PlanError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PlanError::InvalidAmount(input.to_string()));
    }
    let amount: u128 = input
        .parse()
        .map_err(|_| PlanError::InvalidAmount(input.to_string()))?;
    if amount == 0 {
        return Err(PlanError::InvalidAmount(input.to_string()));
    }
    Ok(amount)
}

fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock after the epoch")
        .as_secs()
}

fn swap_timeout_ns() -> u64 {
    let deadline = SystemTime::now() + SWAP_TIMEOUT;
    deadline
        .duration_since(UNIX_EPOCH)
        .expect("system clock after the epoch")
        .as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_broker::MockQuoteClient;
    use wayfinder_config::{assemble, parse_descriptor, RegistryEntry};
    use wayfinder_topology::build;
    use wayfinder_types::compute_ibc_denom;

    const OSMO_SENDER: &str = "osmo1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5helwsw";
    const COSMOS_SENDER: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
    const COSMOS_RECEIVER: &str = "cosmos1v4nxw6rfdf4kcmtwdac8zunnw36hvamcl67qt2";
    const OSMO_RECEIVER: &str = "osmo1v4nxw6rfdf4kcmtwdac8zunnw36hvamchpdsac";

    fn allowlist() -> Vec<String> {
        vec!["www.mintscan.io".to_string()]
    }

    fn pair(chain_1: &str, chain_2: &str, channel: &str, counterparty: &str) -> RegistryEntry {
        serde_json::from_value(serde_json::json!({
            "chain_1": chain_1,
            "chain_2": chain_2,
            "channels": [{
                "channel_id": channel,
                "counterparty_channel_id": counterparty,
                "connection_id": "connection-1",
                "tags": { "status": "ACTIVE", "preferred": true }
            }]
        }))
        .unwrap()
    }

    fn planner(rate_num: u128, rate_den: u128) -> Planner {
        let osmosis = parse_descriptor(
            r#"
            [chain]
            name = "Osmosis"
            id = "osmosis-1"
            type = "cosmos"
            registry = "osmosis"
            explorer_url = "https://www.mintscan.io/osmosis"
            slip44 = 118
            bech32_prefix = "osmo"
            is_broker = true
            broker_id = "osmosis-sqs"
            broker_contract = "osmo1swapcontract"
            swap_venue = "osmosis-poolmanager"
            has_pfm = true

            [[token]]
            denom = "uosmo"
            name = "Osmosis"
            symbol = "OSMO"
            exponent = 6
            "#,
            &allowlist(),
        )
        .unwrap();
        let hub = parse_descriptor(
            r#"
            [chain]
            name = "Cosmos Hub"
            id = "cosmoshub-4"
            type = "cosmos"
            registry = "cosmoshub"
            explorer_url = "https://www.mintscan.io/cosmos"
            slip44 = 118
            bech32_prefix = "cosmos"
            has_pfm = true

            [[token]]
            denom = "uatom"
            name = "Cosmos Hub Atom"
            symbol = "ATOM"
            exponent = 6
            "#,
            &allowlist(),
        )
        .unwrap();
        let registry = vec![pair("osmosis", "cosmoshub", "channel-0", "channel-141")];
        let loaded = assemble(vec![osmosis, hub], registry, &allowlist()).unwrap();
        let topology = Arc::new(build(&loaded).unwrap());
        Planner::new(
            topology,
            Arc::new(MockQuoteClient::with_rate(rate_num, rate_den)),
        )
    }

    fn request() -> RouteRequest {
        RouteRequest {
            chain_from: "osmosis-1".to_string(),
            token_from_denom: "uatom@cosmoshub-4".to_string(),
            amount_in: "100000".to_string(),
            chain_to: "cosmoshub-4".to_string(),
            token_to_denom: None,
            sender: OSMO_SENDER.to_string(),
            receiver: COSMOS_RECEIVER.to_string(),
            smart_route: false,
            slippage_bps: None,
        }
    }

    #[tokio::test]
    async fn test_direct_transfer() {
        let planner = planner(1, 1);
        let plan = planner.find_path(&request()).await.unwrap();

        let RoutePlan::Direct(direct) = plan else {
            panic!("expected a direct route");
        };
        assert_eq!(direct.transfer.channel, "channel-0");
        assert_eq!(direct.transfer.token.base_denom, "uatom");
        assert_eq!(
            direct.transfer.token.chain_denom,
            compute_ibc_denom("transfer/channel-0", "uatom")
        );
        assert_eq!(direct.transfer.amount, "100000");
    }

    #[tokio::test]
    async fn test_swap_on_broker_chain() {
        let planner = planner(2, 1);
        let mut req = request();
        req.chain_to = "osmosis-1".to_string();
        req.token_from_denom = "uosmo".to_string();
        req.token_to_denom = Some("uatom@cosmoshub-4".to_string());
        req.receiver = OSMO_RECEIVER.to_string();

        let plan = planner.find_path(&req).await.unwrap();
        let RoutePlan::BrokerSwap(swap) = plan else {
            panic!("expected a broker swap");
        };
        assert_eq!(swap.path, vec!["osmosis-1"]);
        assert!(swap.inbound_legs.is_empty());
        assert!(swap.outbound_legs.is_empty());
        assert_eq!(swap.swap.amount_out, "200000");
        assert!(!swap.execution.uses_wasm);
        // Default slippage of 100 bps.
        assert_eq!(swap.execution.min_output_amount, "198000");
        assert_eq!(
            swap.execution.recover_address.as_deref(),
            Some(OSMO_SENDER)
        );
    }

    #[tokio::test]
    async fn test_smart_swap_on_broker_chain_uses_contract() {
        let planner = planner(2, 1);
        let mut req = request();
        req.chain_to = "osmosis-1".to_string();
        req.token_from_denom = "uosmo".to_string();
        req.token_to_denom = Some("uatom@cosmoshub-4".to_string());
        req.receiver = OSMO_RECEIVER.to_string();
        req.smart_route = true;

        let plan = planner.find_path(&req).await.unwrap();
        let RoutePlan::BrokerSwap(swap) = plan else {
            panic!("expected a broker swap");
        };
        assert!(swap.execution.uses_wasm);
        let data = swap.execution.smart_contract_data.unwrap();
        assert_eq!(data.contract, "osmo1swapcontract");
        assert_eq!(
            data.msg["swap_and_action"]["post_swap_action"]["transfer"]["to_address"],
            OSMO_RECEIVER
        );
    }

    #[tokio::test]
    async fn test_bad_sender_prefix() {
        let planner = planner(1, 1);
        let mut req = request();
        req.sender = COSMOS_SENDER.to_string();

        let err = planner.find_path(&req).await.unwrap_err();
        match err {
            PlanError::InvalidAddress { reason, .. } => assert!(reason.contains("\"osmo\"")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!planner.find_path(&req).await.unwrap_err().is_in_band());
    }

    #[tokio::test]
    async fn test_invalid_amounts() {
        let planner = planner(1, 1);
        for bad in ["", "0", "-5", "1.5", "10abc"] {
            let mut req = request();
            req.amount_in = bad.to_string();
            assert!(
                matches!(
                    planner.find_path(&req).await.unwrap_err(),
                    PlanError::InvalidAmount(_)
                ),
                "amount {bad:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_slippage_bounds() {
        let planner = planner(1, 1);
        let mut req = request();
        req.slippage_bps = Some(10_001);
        assert!(matches!(
            planner.find_path(&req).await.unwrap_err(),
            PlanError::InvalidSlippage(_)
        ));
    }

    #[tokio::test]
    async fn test_unknown_chain() {
        let planner = planner(1, 1);
        let mut req = request();
        req.chain_from = "nowhere-1".to_string();
        assert!(matches!(
            planner.find_path(&req).await.unwrap_err(),
            PlanError::UnknownChain(_)
        ));
    }

    #[tokio::test]
    async fn test_same_chain_same_token_has_no_route() {
        let planner = planner(1, 1);
        let mut req = request();
        req.chain_to = "osmosis-1".to_string();
        req.token_from_denom = "uosmo".to_string();
        req.token_to_denom = Some("uosmo".to_string());
        req.receiver = OSMO_RECEIVER.to_string();

        let err = planner.find_path(&req).await.unwrap_err();
        assert!(matches!(err, PlanError::NoRoute { .. }));
        assert!(err.is_in_band());
    }

    #[tokio::test]
    async fn test_broker_failure_is_in_band() {
        let osmosis_planner = {
            let planner = planner(1, 1);
            Planner::new(
                planner.topology().clone(),
                Arc::new(MockQuoteClient::with_rate(1, 1).failing_first(10)),
            )
        };
        let mut req = request();
        req.chain_to = "osmosis-1".to_string();
        req.token_from_denom = "uosmo".to_string();
        req.token_to_denom = Some("uatom@cosmoshub-4".to_string());
        req.receiver = OSMO_RECEIVER.to_string();

        let err = osmosis_planner.find_path(&req).await.unwrap_err();
        assert!(matches!(err, PlanError::Broker(_)));
        assert!(err.is_in_band());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100000").unwrap(), 100000);
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("+5").is_err());
    }
}
