use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wayfinder_types::BrokerQuote;

use crate::BrokerError;

/// An amount/denom pair as carried in quote query parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coin {
    pub amount: String,
    pub denom: String,
}

impl Coin {
    pub fn new(amount: impl Into<String>, denom: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            denom: denom.into(),
        }
    }

    /// Concatenated `<amount><denom>` form used on the wire.
    pub fn concat(&self) -> String {
        format!("{}{}", self.amount, self.denom)
    }
}

/// A swap quote request. Exactly one of the exact-in pair
/// (`token_in` + `token_out_denom`) or the exact-out pair
/// (`token_out` + `token_in_denom`) must be set.
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub token_in: Option<Coin>,
    pub token_out_denom: Option<String>,
    pub token_out: Option<Coin>,
    pub token_in_denom: Option<String>,
    /// Request the best single route instead of a split across routes.
    pub single_route: bool,
}

impl QuoteRequest {
    pub fn exact_in(
        amount: impl Into<String>,
        denom_in: impl Into<String>,
        denom_out: impl Into<String>,
    ) -> Self {
        Self {
            token_in: Some(Coin::new(amount, denom_in)),
            token_out_denom: Some(denom_out.into()),
            ..Default::default()
        }
    }

    pub fn exact_out(
        amount: impl Into<String>,
        denom_out: impl Into<String>,
        denom_in: impl Into<String>,
    ) -> Self {
        Self {
            token_out: Some(Coin::new(amount, denom_out)),
            token_in_denom: Some(denom_in.into()),
            ..Default::default()
        }
    }

    pub fn with_single_route(mut self) -> Self {
        self.single_route = true;
        self
    }

    pub fn validate(&self) -> Result<(), BrokerError> {
        let exact_in = self.token_in.is_some() || self.token_out_denom.is_some();
        let exact_out = self.token_out.is_some() || self.token_in_denom.is_some();
        match (exact_in, exact_out) {
            (true, true) => Err(BrokerError::InvalidRequest(
                "tokenIn/tokenOutDenom and tokenOut/tokenInDenom are mutually exclusive"
                    .to_string(),
            )),
            (false, false) => Err(BrokerError::InvalidRequest(
                "one of tokenIn or tokenOut must be set".to_string(),
            )),
            (true, false) if self.token_in.is_none() || self.token_out_denom.is_none() => {
                Err(BrokerError::InvalidRequest(
                    "tokenIn and tokenOutDenom must be set together".to_string(),
                ))
            }
            (false, true) if self.token_out.is_none() || self.token_in_denom.is_none() => {
                Err(BrokerError::InvalidRequest(
                    "tokenOut and tokenInDenom must be set together".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

/// A quote as returned to the planner. Broker-specific internals stay inside
/// `detail`; the planner attributes the quote to a broker chain itself.
#[derive(Debug, Clone)]
pub struct Quote {
    pub denom_in: String,
    pub denom_out: String,
    pub amount_in: String,
    pub amount_out: String,
    pub price_impact: Option<String>,
    pub detail: BrokerQuote,
}

/// A broker chain's quote service.
#[async_trait]
pub trait QuoteClient: Send + Sync {
    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, BrokerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_in_is_valid() {
        let req = QuoteRequest::exact_in("1000000", "uosmo", "uatom");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_exact_out_is_valid() {
        let req = QuoteRequest::exact_out("1000000", "uatom", "uosmo");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_mixed_sides_rejected() {
        let req = QuoteRequest {
            token_in: Some(Coin::new("1", "uosmo")),
            token_out_denom: Some("uatom".to_string()),
            token_out: Some(Coin::new("1", "uatom")),
            token_in_denom: Some("uosmo".to_string()),
            single_route: false,
        };
        assert!(matches!(
            req.validate(),
            Err(BrokerError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_empty_request_rejected() {
        assert!(QuoteRequest::default().validate().is_err());
    }

    #[test]
    fn test_half_pair_rejected() {
        let req = QuoteRequest {
            token_in: Some(Coin::new("1", "uosmo")),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_coin_concat() {
        assert_eq!(Coin::new("1000000", "uosmo").concat(), "1000000uosmo");
    }
}
