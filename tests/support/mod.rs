#![allow(dead_code)]
//! Shared five-chain fixture topology for the end-to-end tests.
//!
//! osmosis-1 hosts the broker. Channels:
//!   osmosis <-> atomone   channel-94814 / channel-2
//!   osmosis <-> cosmoshub channel-0     / channel-141
//!   osmosis <-> noble     channel-750   / channel-1
//!   osmosis <-> juno      channel-42    / channel-0
//!   noble   <-> juno      channel-3     / channel-224

use std::sync::Arc;

use wayfinder_broker::{MockQuoteClient, QuoteClient};
use wayfinder_config::{assemble, parse_descriptor, LoadedChains, RegistryEntry};
use wayfinder_planner::Planner;
use wayfinder_topology::{build, Topology};

pub const OSMO_SENDER: &str = "osmo1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5helwsw";
pub const OSMO_RECEIVER: &str = "osmo1v4nxw6rfdf4kcmtwdac8zunnw36hvamchpdsac";
pub const COSMOS_SENDER: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
pub const COSMOS_RECEIVER: &str = "cosmos1v4nxw6rfdf4kcmtwdac8zunnw36hvamcl67qt2";
pub const ATONE_RECEIVER: &str = "atone1v4nxw6rfdf4kcmtwdac8zunnw36hvamc36z8aj";
pub const JUNO_RECEIVER: &str = "juno1v4nxw6rfdf4kcmtwdac8zunnw36hvamcfgamvk";
pub const NOBLE_RECEIVER: &str = "noble1v4nxw6rfdf4kcmtwdac8zunnw36hvamchetgny";

pub const ATONE_ON_OSMOSIS: &str =
    "ibc/BC26A7A805ECD6822719472BCB7842A48EF09DF206182F8F259B2593EB5D23FB";
pub const ATOM_ON_OSMOSIS: &str =
    "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2";
pub const USDC_ON_OSMOSIS: &str =
    "ibc/498A0751C798A0D9A389AA3691123DADA57DAA4FE165D5C75894505B876BA6E4";

fn allowlist() -> Vec<String> {
    vec!["www.mintscan.io".to_string()]
}

fn chain_descriptor(
    id: &str,
    registry: &str,
    prefix: &str,
    denom: &str,
    symbol: &str,
    has_pfm: bool,
    broker: bool,
) -> String {
    let pfm = if has_pfm { "has_pfm = true\n" } else { "" };
    let broker_lines = if broker {
        concat!(
            "is_broker = true\n",
            "broker_id = \"osmosis-sqs\"\n",
            "broker_contract = \"osmo1swaprouterh4xq3cg2xfcvp9pvmj0nslurfmxwv\"\n",
            "swap_venue = \"osmosis-poolmanager\"\n",
            "broker_priority = 10\n",
        )
    } else {
        ""
    };
    format!(
        r#"
        [chain]
        name = "{symbol}"
        id = "{id}"
        type = "cosmos"
        registry = "{registry}"
        explorer_url = "https://www.mintscan.io/{registry}"
        slip44 = 118
        bech32_prefix = "{prefix}"
        {pfm}{broker_lines}

        [[chain.rpcs]]
        url = "https://rpc.{registry}.example.net"

        [chain.wallet]
        gas_price = "0.025{denom}"
        fee_denom = "{denom}"

        [[token]]
        denom = "{denom}"
        name = "{symbol}"
        symbol = "{symbol}"
        exponent = 6
        "#
    )
}

fn pair(
    chain_1: &str,
    chain_2: &str,
    channel: &str,
    counterparty: &str,
) -> RegistryEntry {
    serde_json::from_value(serde_json::json!({
        "chain_1": chain_1,
        "chain_2": chain_2,
        "channels": [
            {
                "channel_id": "channel-9999",
                "counterparty_channel_id": "channel-9998",
                "connection_id": "connection-9999",
                "tags": { "status": "ACTIVE", "preferred": false }
            },
            {
                "channel_id": channel,
                "counterparty_channel_id": counterparty,
                "connection_id": "connection-1",
                "tags": { "status": "ACTIVE", "preferred": true }
            }
        ]
    }))
    .unwrap()
}

pub fn loaded_chains() -> LoadedChains {
    let descriptors = vec![
        parse_descriptor(
            &chain_descriptor("osmosis-1", "osmosis", "osmo", "uosmo", "OSMO", true, true),
            &allowlist(),
        )
        .unwrap(),
        parse_descriptor(
            &chain_descriptor(
                "cosmoshub-4",
                "cosmoshub",
                "cosmos",
                "uatom",
                "ATOM",
                true,
                false,
            ),
            &allowlist(),
        )
        .unwrap(),
        parse_descriptor(
            &chain_descriptor("atomone-1", "atomone", "atone", "uatone", "ATONE", false, false),
            &allowlist(),
        )
        .unwrap(),
        parse_descriptor(
            &chain_descriptor("noble-1", "noble", "noble", "uusdc", "USDC", true, false),
            &allowlist(),
        )
        .unwrap(),
        parse_descriptor(
            &chain_descriptor("juno-1", "juno", "juno", "ujuno", "JUNO", false, false),
            &allowlist(),
        )
        .unwrap(),
    ];

    let registry = vec![
        pair("osmosis", "atomone", "channel-94814", "channel-2"),
        pair("osmosis", "cosmoshub", "channel-0", "channel-141"),
        pair("osmosis", "noble", "channel-750", "channel-1"),
        pair("osmosis", "juno", "channel-42", "channel-0"),
        pair("noble", "juno", "channel-3", "channel-224"),
    ];

    assemble(descriptors, registry, &allowlist()).unwrap()
}

pub fn topology() -> Arc<Topology> {
    Arc::new(build(&loaded_chains()).unwrap())
}

/// Planner over the fixture topology with a deterministic quote rate.
pub fn planner_with_rate(rate_num: u128, rate_den: u128) -> Planner {
    Planner::new(
        topology(),
        Arc::new(MockQuoteClient::with_rate(rate_num, rate_den)),
    )
}

/// Planner whose broker client always fails.
pub fn planner_with_broken_broker() -> Planner {
    let quotes: Arc<dyn QuoteClient> =
        Arc::new(MockQuoteClient::with_rate(1, 1).failing_first(u32::MAX));
    Planner::new(topology(), quotes)
}
