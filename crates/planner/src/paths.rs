//! Token-constrained path search over the channel graph

use std::collections::{HashSet, VecDeque};
use wayfinder_topology::Topology;
use wayfinder_types::TokenIdentity;

/// One hop of a discovered path, with the denom the token carries on each
/// side of the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub from_chain: String,
    pub to_chain: String,
    pub channel_id: String,
    pub port_id: String,
    pub denom_on_from: String,
    pub dest_denom: String,
}

/// Breadth-first search for the shortest channel path carrying one token
/// identity from `from_chain` to `to_chain`.
///
/// Only channels whose allowed-token map carries the identity at each step
/// are traversed. Ties at equal depth break deterministically: non-broker
/// chains are expanded before broker chains, then lexicographic chain id, so
/// a DEX chain is used as pure transit only when no equally short alternative
/// exists.
pub fn find_token_path(
    topology: &Topology,
    from_chain: &str,
    start_denom: &str,
    identity: &TokenIdentity,
    to_chain: &str,
    max_hops: usize,
) -> Option<Vec<Hop>> {
    if from_chain == to_chain {
        return Some(Vec::new());
    }

    let mut queue: VecDeque<(String, String, Vec<Hop>)> = VecDeque::new();
    let mut visited: HashSet<String> = HashSet::new();

    queue.push_back((from_chain.to_string(), start_denom.to_string(), Vec::new()));
    visited.insert(from_chain.to_string());

    while let Some((chain, denom, path)) = queue.pop_front() {
        if path.len() >= max_hops {
            continue;
        }

        let node = topology.chain(&chain)?;

        // Stable expansion order: non-broker first, then chain id.
        let mut routes: Vec<_> = node.routes.iter().collect();
        routes.sort_by_key(|r| {
            let is_broker = topology
                .chain(&r.to_chain)
                .map(|c| c.is_broker)
                .unwrap_or(false);
            (is_broker, r.to_chain.clone())
        });

        for route in routes {
            if visited.contains(&route.to_chain) {
                continue;
            }
            let Some(allowed) = route.allowed_tokens.get(&denom) else {
                continue;
            };
            if allowed.identity() != *identity {
                continue;
            }

            let mut next_path = path.clone();
            next_path.push(Hop {
                from_chain: chain.clone(),
                to_chain: route.to_chain.clone(),
                channel_id: route.channel_id.clone(),
                port_id: route.port_id.clone(),
                denom_on_from: denom.clone(),
                dest_denom: allowed.dest_denom.clone(),
            });

            if route.to_chain == to_chain {
                return Some(next_path);
            }

            visited.insert(route.to_chain.clone());
            queue.push_back((route.to_chain.clone(), allowed.dest_denom.clone(), next_path));
        }
    }

    None
}
