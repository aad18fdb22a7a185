//! Descriptor validation

use crate::{ChainDescriptor, ConfigError, Result, TokenEntry};
use std::collections::HashSet;

/// A single validation finding, tied to the field it concerns.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a chain descriptor against the loading rules.
///
/// All findings are collected before returning so a bad file reports every
/// problem at once.
pub fn validate_descriptor(desc: &ChainDescriptor, explorer_allowlist: &[String]) -> Result<()> {
    let mut errors = Vec::new();

    let chain = &desc.chain;
    for (field, value) in [
        ("chain.id", &chain.id),
        ("chain.name", &chain.name),
        ("chain.registry", &chain.registry),
        ("chain.bech32_prefix", &chain.bech32_prefix),
    ] {
        if value.is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        }
    }

    if chain.chain_type != "cosmos" {
        errors.push(ValidationError::new(
            "chain.type",
            format!("unsupported chain type {:?}", chain.chain_type),
        ));
    }

    match extract_hostname(&chain.explorer_url) {
        Some(host) if explorer_allowlist.iter().any(|h| h == host) => {}
        Some(host) => errors.push(ValidationError::new(
            "chain.explorer_url",
            format!("hostname {host:?} is not on the explorer allow-list"),
        )),
        None => errors.push(ValidationError::new(
            "chain.explorer_url",
            "not a valid http(s) URL",
        )),
    }

    if chain.is_broker && chain.broker_id.is_none() {
        errors.push(ValidationError::new(
            "chain.broker_id",
            "required when is_broker is set",
        ));
    }

    let mut seen_denoms = HashSet::new();
    for (idx, token) in desc.tokens.iter().enumerate() {
        let field = format!("token[{idx}]");
        if let Err(e) = validate_token(token, &chain.id) {
            errors.push(ValidationError::new(&field, e));
        }
        if !seen_denoms.insert(token.denom.clone()) {
            errors.push(ValidationError::new(
                field,
                format!("duplicate denom {:?}", token.denom),
            ));
        }
    }

    for (idx, received) in desc.received_tokens.iter().enumerate() {
        let field = format!("received_token[{idx}]");
        if received.origin_denom.is_empty() || received.origin_chain.is_empty() {
            errors.push(ValidationError::new(
                &field,
                "origin_denom and origin_chain are required",
            ));
        }
        if received.origin_chain == chain.id {
            errors.push(ValidationError::new(
                field,
                "origin_chain must differ from the declaring chain",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        let message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::ValidationError(message))
    }
}

fn validate_token(token: &TokenEntry, chain_id: &str) -> std::result::Result<(), String> {
    if token.denom.is_empty() {
        return Err("denom is required".to_string());
    }

    if token.exponent > 18 {
        return Err(format!(
            "exponent {} outside the allowed range 0..=18",
            token.exponent
        ));
    }

    if let Some(destinations) = &token.allowed_destinations {
        if destinations.is_empty() {
            return Err("allowed_destinations must not be an empty list".to_string());
        }
        if destinations.len() > 1 && destinations.iter().any(|d| d == "none") {
            return Err("allowed_destinations may contain \"none\" only on its own".to_string());
        }
    }

    match (&token.origin_chain, &token.origin_denom) {
        (None, None) => {}
        (Some(origin), Some(_)) => {
            if origin == chain_id {
                return Err("origin_chain of a routable IBC token must differ from the declaring chain".to_string());
            }
            if !token.denom.starts_with("ibc/") {
                return Err("routable IBC token denom must be an ibc/ hash denom".to_string());
            }
        }
        _ => {
            return Err("origin_chain and origin_denom must be declared together".to_string());
        }
    }

    Ok(())
}

/// Extract the hostname of an http(s) URL without pulling in a URL parser.
pub fn extract_hostname(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let end = rest
        .find(['/', '?', '#'])
        .unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = host.split_once(':').map_or(host, |(h, _)| h);
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChainSection;

    fn allowlist() -> Vec<String> {
        vec!["www.mintscan.io".to_string()]
    }

    fn descriptor() -> ChainDescriptor {
        ChainDescriptor {
            chain: ChainSection {
                name: "Osmosis".to_string(),
                id: "osmosis-1".to_string(),
                chain_type: "cosmos".to_string(),
                registry: "osmosis".to_string(),
                explorer_url: "https://www.mintscan.io/osmosis".to_string(),
                slip44: 118,
                bech32_prefix: "osmo".to_string(),
                is_broker: false,
                broker_id: None,
                broker_contract: None,
                swap_venue: None,
                broker_priority: 100,
                has_pfm: None,
                rpcs: Vec::new(),
                rest: Vec::new(),
                wallet: None,
            },
            tokens: vec![TokenEntry {
                denom: "uosmo".to_string(),
                name: "Osmosis".to_string(),
                symbol: "OSMO".to_string(),
                exponent: 6,
                icon: None,
                coingecko_id: None,
                allowed_destinations: None,
                origin_chain: None,
                origin_denom: None,
            }],
            received_tokens: Vec::new(),
        }
    }

    #[test]
    fn test_valid_descriptor() {
        assert!(validate_descriptor(&descriptor(), &allowlist()).is_ok());
    }

    #[test]
    fn test_unsupported_chain_type() {
        let mut desc = descriptor();
        desc.chain.chain_type = "evm".to_string();
        assert!(validate_descriptor(&desc, &allowlist()).is_err());
    }

    #[test]
    fn test_explorer_hostname_must_be_allowlisted() {
        let mut desc = descriptor();
        desc.chain.explorer_url = "https://evil.example.com/osmosis".to_string();
        assert!(validate_descriptor(&desc, &allowlist()).is_err());
    }

    #[test]
    fn test_broker_requires_broker_id() {
        let mut desc = descriptor();
        desc.chain.is_broker = true;
        assert!(validate_descriptor(&desc, &allowlist()).is_err());

        desc.chain.broker_id = Some("osmosis-sqs".to_string());
        assert!(validate_descriptor(&desc, &allowlist()).is_ok());
    }

    #[test]
    fn test_exponent_bounds() {
        let mut desc = descriptor();
        desc.tokens[0].exponent = 0;
        assert!(validate_descriptor(&desc, &allowlist()).is_ok());

        desc.tokens[0].exponent = 18;
        assert!(validate_descriptor(&desc, &allowlist()).is_ok());

        desc.tokens[0].exponent = 19;
        assert!(validate_descriptor(&desc, &allowlist()).is_err());
    }

    #[test]
    fn test_duplicate_token_denom_rejected() {
        let mut desc = descriptor();
        let dup = desc.tokens[0].clone();
        desc.tokens.push(dup);
        assert!(validate_descriptor(&desc, &allowlist()).is_err());
    }

    #[test]
    fn test_none_must_stand_alone() {
        let mut desc = descriptor();
        desc.tokens[0].allowed_destinations =
            Some(vec!["none".to_string(), "cosmoshub-4".to_string()]);
        assert!(validate_descriptor(&desc, &allowlist()).is_err());

        desc.tokens[0].allowed_destinations = Some(vec!["none".to_string()]);
        assert!(validate_descriptor(&desc, &allowlist()).is_ok());
    }

    #[test]
    fn test_routable_token_needs_both_origin_fields() {
        let mut desc = descriptor();
        desc.tokens[0].origin_chain = Some("noble-1".to_string());
        assert!(validate_descriptor(&desc, &allowlist()).is_err());
    }

    #[test]
    fn test_extract_hostname() {
        assert_eq!(
            extract_hostname("https://www.mintscan.io/osmosis"),
            Some("www.mintscan.io")
        );
        assert_eq!(
            extract_hostname("http://localhost:8080/x"),
            Some("localhost")
        );
        assert_eq!(extract_hostname("ftp://example.com"), None);
        assert_eq!(extract_hostname("https://"), None);
    }
}
