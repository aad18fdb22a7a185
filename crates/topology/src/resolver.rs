//! Denom resolution over the topology

use crate::{DenomError, Topology};
use serde::{Deserialize, Serialize};
use wayfinder_types::{split_origin_spelling, ChainDenom, TokenIdentity};

/// Full description of a denom on one chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenomLookup {
    pub chain_denom: String,
    pub base_denom: String,
    pub origin_chain: String,
    pub is_native: bool,
    /// Trace path on this chain; empty for native denoms and unknown traces.
    pub ibc_path: String,
    /// Chains where the same token identity exists.
    pub available_on: Vec<ChainDenom>,
}

impl Topology {
    /// Resolve an accepted input spelling to the literal denom on `chain_id`.
    ///
    /// Accepts either the on-chain denom itself or `base_denom@origin_chain`.
    pub fn resolve_to_chain_denom(
        &self,
        chain_id: &str,
        input: &str,
    ) -> Result<String, DenomError> {
        let chain = self
            .chain(chain_id)
            .ok_or_else(|| DenomError::UnknownChain(chain_id.to_string()))?;

        if let Some((base, origin)) = split_origin_spelling(input) {
            let identity = TokenIdentity::new(base, origin);
            return self
                .denom_on(chain_id, &identity)
                .ok_or_else(|| DenomError::NotAvailableOnDestination {
                    identity: identity.to_string(),
                    chain: chain_id.to_string(),
                });
        }

        if chain.native_tokens.contains_key(input) || chain.ibc_tokens.contains_key(input) {
            return Ok(input.to_string());
        }

        Err(DenomError::UnknownDenom {
            chain: chain_id.to_string(),
            denom: input.to_string(),
        })
    }

    /// The identity of a literal chain denom, with its nativity.
    pub fn identity_of(&self, chain_id: &str, chain_denom: &str) -> Option<(TokenIdentity, bool)> {
        let chain = self.chain(chain_id)?;
        if chain.native_tokens.contains_key(chain_denom) {
            return Some((TokenIdentity::new(chain_denom, chain_id), true));
        }
        chain
            .ibc_tokens
            .get(chain_denom)
            .map(|t| (t.identity(), false))
    }

    /// The denom representing `identity` on `chain_id`, when it exists there.
    pub fn denom_on(&self, chain_id: &str, identity: &TokenIdentity) -> Option<String> {
        self.identity_index
            .get(identity)?
            .get(chain_id)
            .cloned()
    }

    /// Infer the destination denom for a transfer of `resolved_from` (a
    /// literal denom on `chain_from`) onto `chain_to`.
    pub fn infer_token_to_denom(
        &self,
        chain_from: &str,
        resolved_from: &str,
        chain_to: &str,
    ) -> Result<String, DenomError> {
        if self.chain(chain_to).is_none() {
            return Err(DenomError::UnknownChain(chain_to.to_string()));
        }
        let (identity, _) = self.identity_of(chain_from, resolved_from).ok_or_else(|| {
            DenomError::UnknownDenom {
                chain: chain_from.to_string(),
                denom: resolved_from.to_string(),
            }
        })?;
        self.denom_on(chain_to, &identity)
            .ok_or_else(|| DenomError::NotAvailableOnDestination {
                identity: identity.to_string(),
                chain: chain_to.to_string(),
            })
    }

    /// Resolve a destination denom that may be spelled on either end of the
    /// transfer: first as a denom on `chain_to`, then as a denom on
    /// `chain_from` whose identity is mapped onto `chain_to`.
    pub fn resolve_destination_denom(
        &self,
        chain_from: &str,
        chain_to: &str,
        input: &str,
    ) -> Result<String, DenomError> {
        match self.resolve_to_chain_denom(chain_to, input) {
            Ok(denom) => Ok(denom),
            Err(DenomError::UnknownChain(c)) => Err(DenomError::UnknownChain(c)),
            Err(_) => {
                let on_source = self.resolve_to_chain_denom(chain_from, input)?;
                self.infer_token_to_denom(chain_from, &on_source, chain_to)
            }
        }
    }

    /// Describe a denom on a chain. Returns `None` when the denom does not
    /// resolve there.
    pub fn lookup_denom(
        &self,
        chain_id: &str,
        input: &str,
    ) -> Result<Option<DenomLookup>, DenomError> {
        if self.chain(chain_id).is_none() {
            return Err(DenomError::UnknownChain(chain_id.to_string()));
        }
        let Ok(chain_denom) = self.resolve_to_chain_denom(chain_id, input) else {
            return Ok(None);
        };
        let Some((identity, is_native)) = self.identity_of(chain_id, &chain_denom) else {
            return Ok(None);
        };

        let ibc_path = if is_native {
            String::new()
        } else {
            self.chain(chain_id)
                .and_then(|c| c.ibc_tokens.get(&chain_denom))
                .map(|t| t.path.clone())
                .unwrap_or_default()
        };

        Ok(Some(DenomLookup {
            chain_denom,
            base_denom: identity.base_denom.clone(),
            origin_chain: identity.origin_chain.clone(),
            is_native,
            ibc_path,
            available_on: self.token_denoms_across_chains(
                &identity.base_denom,
                &identity.origin_chain,
                None,
            ),
        }))
    }

    /// Every chain (optionally a single one) where a token identity exists.
    pub fn token_denoms_across_chains(
        &self,
        base_denom: &str,
        origin_chain: &str,
        on_chain: Option<&str>,
    ) -> Vec<ChainDenom> {
        let identity = TokenIdentity::new(base_denom, origin_chain);
        let Some(locations) = self.identity_index.get(&identity) else {
            return Vec::new();
        };
        locations
            .iter()
            .filter(|(chain, _)| on_chain.map_or(true, |c| c == chain.as_str()))
            .map(|(chain, denom)| ChainDenom {
                chain_id: chain.clone(),
                denom: denom.clone(),
            })
            .collect()
    }
}
