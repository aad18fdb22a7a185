//! Mock quote client for tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use wayfinder_types::{BrokerQuote, SqsPool, SqsQuote, SqsRoute};

use crate::{BrokerError, Quote, QuoteClient, QuoteRequest};

/// Deterministic quote client: output is input scaled by a fixed rational
/// rate through a single synthetic pool. Optionally fails the first N
/// requests to exercise failure handling.
pub struct MockQuoteClient {
    rate_num: u128,
    rate_den: u128,
    pool_id: u64,
    fail_remaining: AtomicU32,
}

impl MockQuoteClient {
    pub fn with_rate(rate_num: u128, rate_den: u128) -> Self {
        Self {
            rate_num,
            rate_den,
            pool_id: 1,
            fail_remaining: AtomicU32::new(0),
        }
    }

    pub fn failing_first(mut self, failures: u32) -> Self {
        self.fail_remaining = AtomicU32::new(failures);
        self
    }

    pub fn with_pool_id(mut self, pool_id: u64) -> Self {
        self.pool_id = pool_id;
        self
    }
}

#[async_trait]
impl QuoteClient for MockQuoteClient {
    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, BrokerError> {
        request.validate()?;

        if self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(BrokerError::Unavailable("scripted failure".to_string()));
        }

        let (token_in, denom_out) = match (&request.token_in, &request.token_out_denom) {
            (Some(token_in), Some(denom_out)) => (token_in.clone(), denom_out.clone()),
            _ => {
                return Err(BrokerError::InvalidRequest(
                    "mock client only supports exact-in quotes".to_string(),
                ))
            }
        };

        let amount_in: u128 = token_in
            .amount
            .parse()
            .map_err(|_| BrokerError::InvalidRequest("non-numeric amount".to_string()))?;
        let amount_out = amount_in * self.rate_num / self.rate_den;

        Ok(Quote {
            denom_in: token_in.denom.clone(),
            denom_out: denom_out.clone(),
            amount_in: token_in.amount,
            amount_out: amount_out.to_string(),
            price_impact: Some("0.0010".to_string()),
            detail: BrokerQuote::Sqs(SqsQuote {
                routes: vec![SqsRoute {
                    pools: vec![SqsPool {
                        id: self.pool_id,
                        pool_type: Some("balancer".to_string()),
                        spread_factor: Some("0.002".to_string()),
                        taker_fee: Some("0.001".to_string()),
                        token_out_denom: denom_out,
                        liquidity_cap: Some("1000000000000".to_string()),
                    }],
                    in_amount: amount_in.to_string(),
                    out_amount: amount_out.to_string(),
                    effective_liquidity: Some("1000000000000".to_string()),
                    overflows: false,
                }],
                effective_fee: Some("0.003".to_string()),
            }),
        })
    }
}
