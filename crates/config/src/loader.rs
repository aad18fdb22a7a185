//! Loading of chain descriptors and the channel registry

use crate::{
    validate_descriptor, ChainDescriptor, ConfigError, RegistryEntry, Result, ServiceConfig,
};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Normalised loader output: descriptors keyed by chain id plus the raw
/// registry entries. Enrichment into the routing topology happens downstream.
#[derive(Debug, Clone)]
pub struct LoadedChains {
    pub chains: BTreeMap<String, ChainDescriptor>,
    pub registry: Vec<RegistryEntry>,
}

/// Load descriptors and registry from the locations in the service config.
pub fn load(service: &ServiceConfig) -> Result<LoadedChains> {
    let descriptors = load_chain_dir(&service.chains_dir, &service.explorer_allowlist)?;
    let registry = load_registry(&service.registry_file)?;
    assemble(descriptors, registry, &service.explorer_allowlist)
}

/// Read every `*.toml` descriptor in a directory.
///
/// A file that fails to parse or validate is skipped with a warning; the
/// directory as a whole fails only when nothing loads.
pub fn load_chain_dir(dir: &Path, explorer_allowlist: &[String]) -> Result<Vec<ChainDescriptor>> {
    let mut descriptors = Vec::new();

    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("toml"))
        .collect();
    entries.sort();

    for path in entries {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable descriptor");
                continue;
            }
        };
        match parse_descriptor(&content, explorer_allowlist) {
            Ok(desc) => descriptors.push(desc),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping invalid descriptor");
            }
        }
    }

    if descriptors.is_empty() {
        return Err(ConfigError::NoChains(dir.display().to_string()));
    }

    Ok(descriptors)
}

/// Parse and validate a single descriptor.
pub fn parse_descriptor(
    content: &str,
    explorer_allowlist: &[String],
) -> Result<ChainDescriptor> {
    let desc: ChainDescriptor = toml::from_str(content)?;
    validate_descriptor(&desc, explorer_allowlist)?;
    if desc.tokens.is_empty() && desc.received_tokens.is_empty() {
        warn!(chain = %desc.chain.id, "descriptor declares no tokens");
    }
    Ok(desc)
}

/// Read the channel registry dataset.
pub fn load_registry(path: &Path) -> Result<Vec<RegistryEntry>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(ConfigError::from)
}

/// Index validated descriptors by chain id, dropping duplicates.
pub fn assemble(
    descriptors: Vec<ChainDescriptor>,
    registry: Vec<RegistryEntry>,
    explorer_allowlist: &[String],
) -> Result<LoadedChains> {
    let mut chains = BTreeMap::new();

    for desc in descriptors {
        // Descriptors assembled directly (tests, embedded fixtures) have not
        // necessarily been through parse_descriptor.
        if let Err(e) = validate_descriptor(&desc, explorer_allowlist) {
            warn!(chain = %desc.chain.id, error = %e, "skipping invalid descriptor");
            continue;
        }
        let id = desc.chain.id.clone();
        if chains.contains_key(&id) {
            warn!(chain = %id, "skipping duplicate chain descriptor");
            continue;
        }
        chains.insert(id, desc);
    }

    if chains.is_empty() {
        return Err(ConfigError::NoChains("<assembled>".to_string()));
    }

    Ok(LoadedChains { chains, registry })
}
