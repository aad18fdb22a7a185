//! Topology enrichment
//!
//! Builds the runtime topology from loader output: pair chains through the
//! registry's preferred channels, compute the IBC token set of every chain,
//! and derive each route's allowed-token map. Everything here is pure data
//! derivation; no network calls.

use crate::{
    AllowedToken, ChainNode, Endpoint, IbcToken, NativeToken, Route, Topology, TopologyError,
    WalletInfo,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::warn;
use wayfinder_config::{ChainDescriptor, LoadedChains};
use wayfinder_types::{compute_ibc_denom, TokenIdentity};

/// Build the routing topology. Fails fast on unresolvable references inside
/// the configured chain set; registry entries for unconfigured chains are
/// ignored, since the registry dataset covers the whole ecosystem.
pub fn build(loaded: &LoadedChains) -> Result<Topology, TopologyError> {
    let mut topology = Topology::default();

    // Chain skeletons, sorted by chain id for deterministic indices.
    for (id, desc) in &loaded.chains {
        let idx = topology.chains.len();
        topology.chains.push(node_from_descriptor(desc));
        topology.by_id.insert(id.clone(), idx);
        topology
            .by_registry
            .insert(desc.chain.registry.clone(), idx);
    }

    connect_channels(&mut topology, loaded);
    collect_ibc_tokens(&mut topology, loaded)?;
    compute_allowed_tokens(&mut topology);
    index_identities(&mut topology);

    Ok(topology)
}

fn node_from_descriptor(desc: &ChainDescriptor) -> ChainNode {
    let chain = &desc.chain;

    let native_tokens = desc
        .tokens
        .iter()
        .filter(|t| !t.is_routable_ibc())
        .map(|t| {
            (
                t.denom.clone(),
                NativeToken {
                    denom: t.denom.clone(),
                    name: t.name.clone(),
                    symbol: t.symbol.clone(),
                    exponent: t.exponent,
                    icon: t.icon.clone(),
                    coingecko_id: t.coingecko_id.clone(),
                    allowed_destinations: t.allowed_destinations.clone(),
                },
            )
        })
        .collect();

    ChainNode {
        id: chain.id.clone(),
        name: chain.name.clone(),
        registry: chain.registry.clone(),
        slip44: chain.slip44,
        bech32_prefix: chain.bech32_prefix.clone(),
        explorer_url: chain.explorer_url.clone(),
        has_pfm: chain.has_pfm.unwrap_or(false),
        is_broker: chain.is_broker,
        broker_id: chain.broker_id.clone(),
        broker_contract: chain.broker_contract.clone(),
        swap_venue: chain.swap_venue.clone(),
        broker_priority: chain.broker_priority,
        rpcs: chain
            .rpcs
            .iter()
            .map(|e| Endpoint {
                url: e.url.clone(),
                provider: e.provider.clone(),
            })
            .collect(),
        rest: chain
            .rest
            .iter()
            .map(|e| Endpoint {
                url: e.url.clone(),
                provider: e.provider.clone(),
            })
            .collect(),
        wallet: chain.wallet.as_ref().map(|w| WalletInfo {
            gas_price: w.gas_price.clone(),
            fee_denom: w.fee_denom.clone(),
        }),
        native_tokens,
        ibc_tokens: BTreeMap::new(),
        routes: Vec::new(),
    }
}

/// Walk the registry and emit one symmetric channel pair per connected
/// unordered chain pair, using the first preferred ACTIVE/LIVE channel.
fn connect_channels(topology: &mut Topology, loaded: &LoadedChains) {
    let mut connected: HashSet<(usize, usize)> = HashSet::new();

    for entry in &loaded.registry {
        let (Some(&a), Some(&b)) = (
            topology.by_registry.get(&entry.chain_1),
            topology.by_registry.get(&entry.chain_2),
        ) else {
            continue;
        };

        let pair = (a.min(b), a.max(b));
        if connected.contains(&pair) {
            warn!(
                chain_1 = %entry.chain_1,
                chain_2 = %entry.chain_2,
                "pair already connected, ignoring additional registry entry"
            );
            continue;
        }

        let Some(channel) = entry.channels.iter().find(|c| c.is_usable()) else {
            continue;
        };
        connected.insert(pair);

        let id_a = topology.chains[a].id.clone();
        let id_b = topology.chains[b].id.clone();

        topology.chains[a].routes.push(Route {
            to_chain: id_b,
            channel_id: channel.channel_id.clone(),
            port_id: channel.port_id.clone(),
            connection_id: channel.connection_id.clone(),
            counterparty_channel_id: channel.counterparty_channel_id.clone(),
            allowed_tokens: BTreeMap::new(),
        });
        topology.chains[b].routes.push(Route {
            to_chain: id_a,
            channel_id: channel.counterparty_channel_id.clone(),
            port_id: channel.port_id.clone(),
            connection_id: channel.connection_id.clone(),
            counterparty_channel_id: channel.channel_id.clone(),
            allowed_tokens: BTreeMap::new(),
        });
    }

    for node in &mut topology.chains {
        node.routes.sort_by(|x, y| x.to_chain.cmp(&y.to_chain));
    }
}

/// Compute every chain's IBC token set: native tokens of each directly
/// connected peer, plus declared routable tokens.
fn collect_ibc_tokens(
    topology: &mut Topology,
    loaded: &LoadedChains,
) -> Result<(), TopologyError> {
    let native_by_id: HashMap<String, Vec<NativeToken>> = topology
        .chains
        .iter()
        .map(|c| (c.id.clone(), c.native_tokens.values().cloned().collect()))
        .collect();

    // Tokens received over a direct channel.
    for node in &mut topology.chains {
        let routes = node.routes.clone();
        for route in &routes {
            let Some(peer_tokens) = native_by_id.get(&route.to_chain) else {
                continue;
            };
            for token in peer_tokens {
                let path = format!("{}/{}", route.port_id, route.channel_id);
                let denom = compute_ibc_denom(&path, &token.denom);
                node.ibc_tokens.entry(denom.clone()).or_insert(IbcToken {
                    denom,
                    base_denom: token.denom.clone(),
                    origin_chain: route.to_chain.clone(),
                    path,
                    routable: false,
                    allowed_destinations: None,
                    display_name: Some(token.name.clone()),
                    display_symbol: Some(token.symbol.clone()),
                });
            }
        }
    }

    // Declared routable tokens (explicit denom form).
    for (chain_id, desc) in &loaded.chains {
        let idx = topology.by_id[chain_id];
        for entry in desc.tokens.iter().filter(|t| t.is_routable_ibc()) {
            let origin_chain = entry.origin_chain.clone().unwrap_or_default();
            let origin_denom = entry.origin_denom.clone().unwrap_or_default();
            if !topology.by_id.contains_key(&origin_chain) {
                return Err(TopologyError::UnknownChainRef {
                    referenced: origin_chain,
                    referrer: format!("{chain_id} token {}", entry.denom),
                });
            }

            // Reconstruct the trace when the token arrived over the direct
            // channel to its origin; multi-hop traces stay unknown.
            let path = topology.chains[idx]
                .route_to(&origin_chain)
                .map(|r| format!("{}/{}", r.port_id, r.channel_id))
                .filter(|p| compute_ibc_denom(p, &origin_denom) == entry.denom)
                .unwrap_or_default();

            let node = &mut topology.chains[idx];
            match node.ibc_tokens.get_mut(&entry.denom) {
                Some(existing) => {
                    existing.routable = true;
                    existing.allowed_destinations = entry.allowed_destinations.clone();
                    existing.display_name = Some(entry.name.clone());
                    existing.display_symbol = Some(entry.symbol.clone());
                }
                None => {
                    node.ibc_tokens.insert(
                        entry.denom.clone(),
                        IbcToken {
                            denom: entry.denom.clone(),
                            base_denom: origin_denom,
                            origin_chain,
                            path,
                            routable: true,
                            allowed_destinations: entry.allowed_destinations.clone(),
                            display_name: Some(entry.name.clone()),
                            display_symbol: Some(entry.symbol.clone()),
                        },
                    );
                }
            }
        }

        // Received-token form: the on-chain denom is derived from the hop
        // list, recorded trace segment by trace segment.
        for received in &desc.received_tokens {
            let mut hops: Vec<&str> = vec![received.origin_chain.as_str()];
            hops.extend(received.via_chains.iter().map(|c| c.as_str()));
            hops.push(chain_id);

            for hop in &hops {
                if !topology.by_id.contains_key(*hop) {
                    return Err(TopologyError::UnknownChainRef {
                        referenced: hop.to_string(),
                        referrer: format!(
                            "{chain_id} received token {}@{}",
                            received.origin_denom, received.origin_chain
                        ),
                    });
                }
            }

            let mut segments = Vec::with_capacity(hops.len() - 1);
            for window in hops.windows(2).rev() {
                let (prev, cur) = (window[0], window[1]);
                let cur_idx = topology.by_id[cur];
                let Some(route) = topology.chains[cur_idx].route_to(prev) else {
                    return Err(TopologyError::MissingChannel {
                        from: cur.to_string(),
                        to: prev.to_string(),
                        denom: received.origin_denom.clone(),
                    });
                };
                segments.push(format!("{}/{}", route.port_id, route.channel_id));
            }
            let path = segments.join("/");
            let denom = compute_ibc_denom(&path, &received.origin_denom);

            let node = &mut topology.chains[idx];
            match node.ibc_tokens.get_mut(&denom) {
                Some(existing) => {
                    existing.routable = true;
                    existing.allowed_destinations = received.allowed_destinations.clone();
                }
                None => {
                    node.ibc_tokens.insert(
                        denom.clone(),
                        IbcToken {
                            denom,
                            base_denom: received.origin_denom.clone(),
                            origin_chain: received.origin_chain.clone(),
                            path,
                            routable: true,
                            allowed_destinations: received.allowed_destinations.clone(),
                            display_name: received.display_name.clone(),
                            display_symbol: received.display_symbol.clone(),
                        },
                    );
                }
            }
        }
    }

    Ok(())
}

/// Derive each route's allowed-token map from the token declarations alone.
fn compute_allowed_tokens(topology: &mut Topology) {
    let native_by_id: HashMap<String, Vec<NativeToken>> = topology
        .chains
        .iter()
        .map(|c| (c.id.clone(), c.native_tokens.values().cloned().collect()))
        .collect();

    for node in &mut topology.chains {
        let own_id = node.id.clone();
        let own_natives: Vec<NativeToken> = node.native_tokens.values().cloned().collect();
        let own_routables: Vec<IbcToken> = node
            .ibc_tokens
            .values()
            .filter(|t| t.routable)
            .cloned()
            .collect();

        for route in &mut node.routes {
            let dest = route.to_chain.clone();
            let mut allowed = BTreeMap::new();

            // Native tokens exported from this chain.
            for token in &own_natives {
                if !allows_destination(&token.allowed_destinations, &dest) {
                    continue;
                }
                allowed.insert(
                    token.denom.clone(),
                    AllowedToken {
                        dest_denom: compute_ibc_denom(
                            &format!("{}/{}", route.port_id, route.counterparty_channel_id),
                            &token.denom,
                        ),
                        base_denom: token.denom.clone(),
                        origin_chain: own_id.clone(),
                    },
                );
            }

            // The peer's native tokens unwinding home.
            if let Some(peer_tokens) = native_by_id.get(&dest) {
                for token in peer_tokens {
                    let source_denom = compute_ibc_denom(
                        &format!("{}/{}", route.port_id, route.channel_id),
                        &token.denom,
                    );
                    allowed.insert(
                        source_denom,
                        AllowedToken {
                            dest_denom: token.denom.clone(),
                            base_denom: token.denom.clone(),
                            origin_chain: dest.clone(),
                        },
                    );
                }
            }

            // Declared routable IBC tokens forwarded onward.
            for token in &own_routables {
                if !token.allows_destination(&dest) {
                    continue;
                }
                let dest_denom = if dest == token.origin_chain {
                    token.base_denom.clone()
                } else {
                    compute_ibc_denom(
                        &format!("{}/{}", route.port_id, route.counterparty_channel_id),
                        &token.denom,
                    )
                };
                allowed.entry(token.denom.clone()).or_insert(AllowedToken {
                    dest_denom,
                    base_denom: token.base_denom.clone(),
                    origin_chain: token.origin_chain.clone(),
                });
            }

            route.allowed_tokens = allowed;
        }
    }
}

fn allows_destination(allowed: &Option<Vec<String>>, dest: &str) -> bool {
    match allowed {
        None => true,
        Some(list) => {
            !matches!(list.as_slice(), [only] if only == "none")
                && list.iter().any(|d| d == dest)
        }
    }
}

fn index_identities(topology: &mut Topology) {
    let mut index: HashMap<TokenIdentity, BTreeMap<String, String>> = HashMap::new();

    for node in &topology.chains {
        for token in node.native_tokens.values() {
            index
                .entry(TokenIdentity::new(&token.denom, &node.id))
                .or_default()
                .entry(node.id.clone())
                .or_insert_with(|| token.denom.clone());
        }
    }
    for node in &topology.chains {
        for token in node.ibc_tokens.values() {
            index
                .entry(token.identity())
                .or_default()
                .entry(node.id.clone())
                .or_insert_with(|| token.denom.clone());
        }
    }

    topology.identity_index = index;
}
