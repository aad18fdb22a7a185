//! End-to-end planner scenarios over the five-chain fixture topology.

mod support;

use support::*;
use wayfinder_planner::PlanError;
use wayfinder_types::{RoutePlan, RouteRequest};

fn request(
    chain_from: &str,
    token_from: &str,
    chain_to: &str,
    token_to: Option<&str>,
    sender: &str,
    receiver: &str,
) -> RouteRequest {
    RouteRequest {
        chain_from: chain_from.to_string(),
        token_from_denom: token_from.to_string(),
        amount_in: "100000".to_string(),
        chain_to: chain_to.to_string(),
        token_to_denom: token_to.map(String::from),
        sender: sender.to_string(),
        receiver: receiver.to_string(),
        smart_route: false,
        slippage_bps: None,
    }
}

#[tokio::test]
async fn test_direct_unwind_to_atomone() {
    let planner = planner_with_rate(1, 1);
    let req = request(
        "osmosis-1",
        ATONE_ON_OSMOSIS,
        "atomone-1",
        None,
        OSMO_SENDER,
        ATONE_RECEIVER,
    );

    let plan = planner.find_path(&req).await.unwrap();
    let RoutePlan::Direct(direct) = plan else {
        panic!("expected a direct route");
    };

    assert_eq!(direct.transfer.channel, "channel-94814");
    assert_eq!(direct.transfer.from_chain, "osmosis-1");
    assert_eq!(direct.transfer.to_chain, "atomone-1");
    assert_eq!(direct.transfer.token.chain_denom, ATONE_ON_OSMOSIS);
    assert_eq!(direct.transfer.token.base_denom, "uatone");
    assert_eq!(direct.transfer.token.origin_chain, "atomone-1");
    assert!(!direct.transfer.token.is_native);
    assert_eq!(direct.transfer.amount, "100000");
}

#[tokio::test]
async fn test_swap_on_broker_chain_itself() {
    let planner = planner_with_rate(2, 1);
    let req = request(
        "osmosis-1",
        "uosmo",
        "osmosis-1",
        Some(ATONE_ON_OSMOSIS),
        OSMO_SENDER,
        OSMO_RECEIVER,
    );

    let plan = planner.find_path(&req).await.unwrap();
    let RoutePlan::BrokerSwap(swap) = plan else {
        panic!("expected a broker swap");
    };

    assert_eq!(swap.path, vec!["osmosis-1"]);
    assert!(swap.inbound_legs.is_empty());
    assert!(swap.outbound_legs.is_empty());
    assert_eq!(swap.swap.broker, "osmosis-sqs");
    assert_eq!(swap.swap.denom_in, "uosmo");
    assert_eq!(swap.swap.denom_out, ATONE_ON_OSMOSIS);
    assert_eq!(swap.swap.amount_out, "200000");
    assert!(!swap.execution.uses_wasm);
    assert!(swap.execution.memo.is_none());
    assert!(swap.execution.smart_contract_data.is_none());
}

#[tokio::test]
async fn test_swap_then_single_leg_to_hub() {
    let planner = planner_with_rate(2, 1);
    let mut req = request(
        "osmosis-1",
        "uosmo",
        "cosmoshub-4",
        Some(ATOM_ON_OSMOSIS),
        OSMO_SENDER,
        COSMOS_RECEIVER,
    );
    req.slippage_bps = Some(0);

    let plan = planner.find_path(&req).await.unwrap();
    let RoutePlan::BrokerSwap(swap) = plan else {
        panic!("expected a broker swap");
    };

    assert_eq!(swap.path, vec!["osmosis-1", "cosmoshub-4"]);
    assert!(swap.inbound_legs.is_empty());
    assert_eq!(swap.outbound_legs.len(), 1);
    assert_eq!(swap.outbound_legs[0].channel, "channel-0");
    assert_eq!(swap.outbound_legs[0].token.chain_denom, ATOM_ON_OSMOSIS);
    assert!(swap.outbound_supports_pfm);
    assert_eq!(swap.execution.min_output_amount, swap.swap.amount_out);
    assert_eq!(
        swap.execution.recover_address.as_deref(),
        Some(OSMO_SENDER)
    );
}

#[tokio::test]
async fn test_smart_route_multi_hop_swap() {
    let planner = planner_with_rate(3, 1);
    let mut req = request(
        "cosmoshub-4",
        "uatom",
        "juno-1",
        Some("uusdc@noble-1"),
        COSMOS_SENDER,
        JUNO_RECEIVER,
    );
    req.smart_route = true;

    let plan = planner.find_path(&req).await.unwrap();
    let RoutePlan::BrokerSwap(swap) = plan else {
        panic!("expected a broker swap");
    };

    assert_eq!(swap.path, vec!["cosmoshub-4", "osmosis-1", "juno-1"]);

    assert_eq!(swap.inbound_legs.len(), 1);
    assert_eq!(swap.inbound_legs[0].channel, "channel-141");
    assert_eq!(swap.inbound_legs[0].token.chain_denom, "uatom");
    assert!(swap.inbound_legs[0].token.is_native);

    assert_eq!(swap.outbound_legs.len(), 2);
    assert_eq!(swap.outbound_legs[0].channel, "channel-750");
    assert_eq!(swap.outbound_legs[0].token.chain_denom, USDC_ON_OSMOSIS);
    assert_eq!(swap.outbound_legs[1].channel, "channel-3");
    assert_eq!(swap.outbound_legs[1].token.chain_denom, "uusdc");
    assert!(swap.outbound_supports_pfm);

    assert_eq!(swap.swap.denom_in, ATOM_ON_OSMOSIS);
    assert_eq!(swap.swap.denom_out, USDC_ON_OSMOSIS);

    assert!(swap.execution.uses_wasm);
    let memo = swap.execution.memo.as_deref().expect("smart memo present");
    let parsed: serde_json::Value = serde_json::from_str(memo).unwrap();

    assert_eq!(
        parsed["wasm"]["contract"],
        "osmo1swaprouterh4xq3cg2xfcvp9pvmj0nslurfmxwv"
    );
    let ibc_info =
        &parsed["wasm"]["msg"]["swap_and_action"]["post_swap_action"]["ibc_transfer"]["ibc_info"];
    assert_eq!(ibc_info["source_channel"], "channel-750");
    assert_eq!(ibc_info["receiver"], NOBLE_RECEIVER);
    assert_eq!(ibc_info["recover_address"], OSMO_SENDER);

    // The nested forward block executes on noble and targets juno.
    let inner: serde_json::Value =
        serde_json::from_str(ibc_info["memo"].as_str().unwrap()).unwrap();
    assert_eq!(inner["forward"]["channel"], "channel-3");
    assert_eq!(inner["forward"]["port"], "transfer");
    assert_eq!(inner["forward"]["receiver"], JUNO_RECEIVER);
}

#[tokio::test]
async fn test_indirect_with_pfm() {
    let planner = planner_with_rate(1, 1);
    let mut req = request(
        "osmosis-1",
        "uusdc@noble-1",
        "juno-1",
        None,
        OSMO_SENDER,
        JUNO_RECEIVER,
    );
    req.smart_route = true;

    let plan = planner.find_path(&req).await.unwrap();
    let RoutePlan::Indirect(indirect) = plan else {
        panic!("expected an indirect route");
    };

    assert_eq!(indirect.path, vec!["osmosis-1", "noble-1", "juno-1"]);
    assert_eq!(indirect.legs.len(), 2);
    assert!(indirect.supports_pfm);
    assert_eq!(indirect.pfm_start_chain, "osmosis-1");

    let memo: serde_json::Value =
        serde_json::from_str(indirect.pfm_memo.as_deref().unwrap()).unwrap();
    assert_eq!(memo["forward"]["channel"], "channel-3");
    assert_eq!(memo["forward"]["port"], "transfer");
    assert_eq!(memo["forward"]["receiver"], JUNO_RECEIVER);
}

#[tokio::test]
async fn test_sender_prefix_mismatch() {
    let planner = planner_with_rate(1, 1);
    let req = request(
        "osmosis-1",
        "uosmo",
        "cosmoshub-4",
        None,
        COSMOS_SENDER,
        COSMOS_RECEIVER,
    );

    let err = planner.find_path(&req).await.unwrap_err();
    match err {
        PlanError::InvalidAddress { reason, .. } => {
            assert!(reason.contains("\"osmo\""), "reason: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_path_endpoints_invariant() {
    let planner = planner_with_rate(2, 1);

    let direct = planner
        .find_path(&request(
            "osmosis-1",
            ATONE_ON_OSMOSIS,
            "atomone-1",
            None,
            OSMO_SENDER,
            ATONE_RECEIVER,
        ))
        .await
        .unwrap();
    assert_eq!(direct.path().first().unwrap(), "osmosis-1");
    assert_eq!(direct.path().last().unwrap(), "atomone-1");

    let swap = planner
        .find_path(&request(
            "osmosis-1",
            "uosmo",
            "osmosis-1",
            Some(ATONE_ON_OSMOSIS),
            OSMO_SENDER,
            OSMO_RECEIVER,
        ))
        .await
        .unwrap();
    assert_eq!(swap.path(), vec!["osmosis-1"]);
}

#[tokio::test]
async fn test_empty_token_to_fails_when_identity_missing_on_destination() {
    let planner = planner_with_rate(1, 1);
    // ATOM never reaches juno in this topology, so inference must fail.
    let req = request(
        "cosmoshub-4",
        "uatom",
        "juno-1",
        None,
        COSMOS_SENDER,
        JUNO_RECEIVER,
    );

    let err = planner.find_path(&req).await.unwrap_err();
    assert!(matches!(err, PlanError::Denom(_)), "got {err}");
    assert!(!err.is_in_band());
}

#[tokio::test]
async fn test_broker_outage_is_reported_in_band() {
    let planner = planner_with_broken_broker();
    let req = request(
        "osmosis-1",
        "uosmo",
        "osmosis-1",
        Some(ATONE_ON_OSMOSIS),
        OSMO_SENDER,
        OSMO_RECEIVER,
    );

    let err = planner.find_path(&req).await.unwrap_err();
    assert!(matches!(err, PlanError::Broker(_)));
    assert!(err.is_in_band());
}

#[tokio::test]
async fn test_indirect_without_pfm_support_emits_no_memo() {
    // ujuno from osmosis to noble unwinds through juno, which has no PFM.
    let planner = planner_with_rate(1, 1);
    let req = request(
        "osmosis-1",
        "ujuno@juno-1",
        "noble-1",
        None,
        OSMO_SENDER,
        NOBLE_RECEIVER,
    );

    let plan = planner.find_path(&req).await.unwrap();
    let RoutePlan::Indirect(indirect) = plan else {
        panic!("expected an indirect route");
    };
    assert_eq!(indirect.path, vec!["osmosis-1", "juno-1", "noble-1"]);
    assert!(!indirect.supports_pfm);
    assert!(indirect.pfm_memo.is_none());
}
