use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Compute the on-chain IBC denom for a trace path and base denom.
///
/// The result is `ibc/` followed by the uppercase hex SHA-256 of
/// `"{path}/{base_denom}"`. An empty path means the denom is native and is
/// returned unchanged.
pub fn compute_ibc_denom(path: &str, base_denom: &str) -> String {
    if path.is_empty() {
        return base_denom.to_string();
    }

    let trace = format!("{}/{}", path, base_denom);
    let mut hasher = Sha256::new();
    hasher.update(trace.as_bytes());
    let hash = hasher.finalize();

    format!("ibc/{}", hex::encode(hash).to_uppercase())
}

/// One `(port, channel)` pair of an IBC denom trace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceHop {
    pub port: String,
    pub channel: String,
}

/// A parsed IBC denom trace.
///
/// The path is read left-to-right in the order the receiving chains recorded
/// it, so `first_hop` is the segment closest to the chain holding the denom.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DenomTrace {
    pub ports: Vec<String>,
    pub channels: Vec<String>,
    pub hop_count: usize,
    pub first_hop: Option<TraceHop>,
    pub ibc_denom: String,
}

/// Parse an IBC trace path into its `(port, channel)` hops.
///
/// Malformed paths (odd segment count, empty segments) parse to zero hops.
pub fn parse_trace(path: &str, base_denom: &str) -> DenomTrace {
    let ibc_denom = compute_ibc_denom(path, base_denom);

    if path.is_empty() {
        return DenomTrace {
            ports: Vec::new(),
            channels: Vec::new(),
            hop_count: 0,
            first_hop: None,
            ibc_denom,
        };
    }

    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() % 2 != 0 || segments.iter().any(|s| s.is_empty()) {
        return DenomTrace {
            ports: Vec::new(),
            channels: Vec::new(),
            hop_count: 0,
            first_hop: None,
            ibc_denom,
        };
    }

    let mut ports = Vec::with_capacity(segments.len() / 2);
    let mut channels = Vec::with_capacity(segments.len() / 2);
    for pair in segments.chunks(2) {
        ports.push(pair[0].to_string());
        channels.push(pair[1].to_string());
    }

    let first_hop = Some(TraceHop {
        port: ports[0].clone(),
        channel: channels[0].clone(),
    });

    DenomTrace {
        hop_count: ports.len(),
        ports,
        channels,
        first_hop,
        ibc_denom,
    }
}

/// Split the `base_denom@origin_chain` spelling of a denom.
///
/// Returns `None` when the input is not in origin form or either side is
/// empty. A denom may legitimately contain `@` only as this separator.
pub fn split_origin_spelling(input: &str) -> Option<(&str, &str)> {
    let (base, origin) = input.split_once('@')?;
    if base.is_empty() || origin.is_empty() || origin.contains('@') {
        return None;
    }
    Some((base, origin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_ibc_denom_atom_on_osmosis() {
        let denom = compute_ibc_denom("transfer/channel-0", "uatom");
        assert_eq!(
            denom,
            "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2"
        );
    }

    #[test]
    fn test_compute_ibc_denom_osmo_on_hub() {
        let denom = compute_ibc_denom("transfer/channel-141", "uosmo");
        assert_eq!(
            denom,
            "ibc/14F9BC3E44B8A9C1BE1FB08980FAB87034C9905EF17CF2F5008FC085218811CC"
        );
    }

    #[test]
    fn test_compute_ibc_denom_usdc_on_osmosis() {
        let denom = compute_ibc_denom("transfer/channel-750", "uusdc");
        assert_eq!(
            denom,
            "ibc/498A0751C798A0D9A389AA3691123DADA57DAA4FE165D5C75894505B876BA6E4"
        );
    }

    #[test]
    fn test_compute_ibc_denom_native() {
        assert_eq!(compute_ibc_denom("", "uatom"), "uatom");
    }

    #[test]
    fn test_parse_trace_single_hop() {
        let trace = parse_trace("transfer/channel-0", "uatom");
        assert_eq!(trace.hop_count, 1);
        assert_eq!(trace.ports, vec!["transfer"]);
        assert_eq!(trace.channels, vec!["channel-0"]);
        let first = trace.first_hop.unwrap();
        assert_eq!(first.port, "transfer");
        assert_eq!(first.channel, "channel-0");
    }

    #[test]
    fn test_parse_trace_multi_hop() {
        let trace = parse_trace("transfer/channel-3/transfer/channel-750", "uusdc");
        assert_eq!(trace.hop_count, 2);
        assert_eq!(trace.channels, vec!["channel-3", "channel-750"]);
        assert_eq!(trace.first_hop.unwrap().channel, "channel-3");
    }

    #[test]
    fn test_parse_trace_round_trip() {
        for (path, base) in [
            ("transfer/channel-0", "uatom"),
            ("transfer/channel-141", "uosmo"),
            ("transfer/channel-3/transfer/channel-750", "uusdc"),
        ] {
            let trace = parse_trace(path, base);
            assert_eq!(trace.ibc_denom, compute_ibc_denom(path, base));
        }
    }

    #[test]
    fn test_parse_trace_malformed() {
        // Odd segment count.
        let trace = parse_trace("transfer/channel-0/transfer", "uatom");
        assert_eq!(trace.hop_count, 0);
        assert!(trace.ports.is_empty());
        assert!(trace.first_hop.is_none());

        // Empty segment.
        let trace = parse_trace("transfer//channel-0", "uatom");
        assert_eq!(trace.hop_count, 0);
    }

    #[test]
    fn test_parse_trace_empty_path() {
        let trace = parse_trace("", "uosmo");
        assert_eq!(trace.hop_count, 0);
        assert_eq!(trace.ibc_denom, "uosmo");
    }

    #[test]
    fn test_split_origin_spelling() {
        assert_eq!(
            split_origin_spelling("uusdc@noble-1"),
            Some(("uusdc", "noble-1"))
        );
        assert_eq!(split_origin_spelling("uatom"), None);
        assert_eq!(split_origin_spelling("@noble-1"), None);
        assert_eq!(split_origin_spelling("uusdc@"), None);
        assert_eq!(split_origin_spelling("a@b@c"), None);
    }
}
