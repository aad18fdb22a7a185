//! Bech32 address checks and prefix rewriting

use crate::PlanError;

/// Validate that an address decodes as bech32 and carries the expected
/// human-readable prefix.
pub fn validate_address(address: &str, expected_prefix: &str) -> Result<(), PlanError> {
    let (hrp, _) = bech32::decode(address).map_err(|e| PlanError::InvalidAddress {
        address: address.to_string(),
        reason: format!("not a valid bech32 address: {e}"),
    })?;

    let expected = bech32::Hrp::parse(expected_prefix).map_err(|e| PlanError::InvalidAddress {
        address: address.to_string(),
        reason: format!("invalid prefix {expected_prefix:?}: {e}"),
    })?;

    if hrp != expected {
        return Err(PlanError::InvalidAddress {
            address: address.to_string(),
            reason: format!(
                "expected address prefix {:?}, got {:?}",
                expected_prefix,
                hrp.to_string()
            ),
        });
    }

    Ok(())
}

/// Re-encode an address under a different prefix. The payload is unchanged,
/// so the result addresses the same key on the target chain.
pub fn rewrite_prefix(address: &str, new_prefix: &str) -> Result<String, PlanError> {
    let (_, data) = bech32::decode(address).map_err(|e| PlanError::InvalidAddress {
        address: address.to_string(),
        reason: format!("not a valid bech32 address: {e}"),
    })?;

    let hrp = bech32::Hrp::parse(new_prefix).map_err(|e| PlanError::InvalidAddress {
        address: address.to_string(),
        reason: format!("invalid prefix {new_prefix:?}: {e}"),
    })?;

    bech32::encode::<bech32::Bech32>(hrp, &data).map_err(|e| PlanError::InvalidAddress {
        address: address.to_string(),
        reason: format!("re-encoding failed: {e}"),
    })
}
