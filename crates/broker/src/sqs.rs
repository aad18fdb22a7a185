//! Sidecar query server client

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};
use wayfinder_config::BrokerSettings;
use wayfinder_types::{BrokerQuote, SqsPool, SqsQuote, SqsRoute};

use crate::{BrokerError, Quote, QuoteClient, QuoteRequest, RetrySchedule};

/// Path probed to decide whether an endpoint is alive.
const HEALTH_PATH: &str = "/healthcheck";

/// Quote client for a broker chain's sidecar query server, with retry and
/// endpoint failover.
pub struct SqsClient {
    /// All endpoints, primary first.
    endpoints: Vec<String>,
    /// Index of the endpoint serving requests right now.
    current: RwLock<usize>,
    client: reqwest::Client,
    schedule: RetrySchedule,
    health_interval: Duration,
    shutdown: watch::Sender<bool>,
}

impl SqsClient {
    pub fn new(endpoints: Vec<String>) -> Result<Self, BrokerError> {
        if endpoints.is_empty() {
            return Err(BrokerError::InvalidRequest(
                "at least one broker endpoint is required".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| BrokerError::QueryFailed(e.to_string()))?;
        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            endpoints,
            current: RwLock::new(0),
            client,
            schedule: RetrySchedule::doubling(3, Duration::from_millis(500)),
            health_interval: Duration::from_secs(30),
            shutdown,
        })
    }

    pub fn from_settings(settings: &BrokerSettings) -> Result<Self, BrokerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()
            .map_err(|e| BrokerError::QueryFailed(e.to_string()))?;
        let (shutdown, _) = watch::channel(false);

        let endpoints = settings.endpoints();
        if endpoints.is_empty() {
            return Err(BrokerError::InvalidRequest(
                "at least one broker endpoint is required".to_string(),
            ));
        }

        Ok(Self {
            endpoints,
            current: RwLock::new(0),
            client,
            schedule: RetrySchedule::from_settings(settings),
            health_interval: Duration::from_secs(settings.health_check_interval_secs),
            shutdown,
        })
    }

    /// Endpoint currently serving requests.
    pub async fn current_endpoint(&self) -> String {
        let idx = *self.current.read().await;
        self.endpoints[idx].clone()
    }

    /// Spawn the background task that restores the primary endpoint once it
    /// probes healthy again. Runs until `close` is called.
    pub fn spawn_health_task(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let this = Arc::clone(self);
        let mut rx = this.shutdown.subscribe();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(this.health_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let current = *this.current.read().await;
                        if current != 0 && this.probe(&this.endpoints[0]).await {
                            *this.current.write().await = 0;
                            info!(endpoint = %this.endpoints[0], "restored primary broker endpoint");
                        }
                    }
                    _ = rx.changed() => break,
                }
            }
        })
    }

    /// Stop the health-restoration task.
    pub fn close(&self) {
        let _ = self.shutdown.send(true);
    }

    async fn probe(&self, base: &str) -> bool {
        let url = format!("{}{}", base.trim_end_matches('/'), HEALTH_PATH);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(endpoint = %base, error = %e, "liveness probe failed");
                false
            }
        }
    }

    async fn fetch_quote(&self, base: &str, request: &QuoteRequest) -> Result<Quote, BrokerError> {
        let url = format!("{}/router/quote", base.trim_end_matches('/'));
        let params = quote_params(request);

        debug!(url = %url, "querying broker quote service");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| BrokerError::QueryFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BrokerError::QueryFailed(format!("HTTP {status}: {body}")));
        }

        let quote: SqsQuoteResponse = response
            .json()
            .await
            .map_err(|e| BrokerError::QueryFailed(format!("failed to parse response: {e}")))?;

        Ok(map_response(request, quote))
    }

    async fn try_with_retries(
        &self,
        base: &str,
        request: &QuoteRequest,
    ) -> Result<Quote, BrokerError> {
        let mut last_error = BrokerError::QueryFailed("no attempts made".to_string());

        for attempt in 0..self.schedule.attempts() {
            if let Some(pause) = self.schedule.pause_before(attempt) {
                tokio::time::sleep(pause).await;
            }
            match self.fetch_quote(base, request).await {
                Ok(quote) => return Ok(quote),
                Err(e) => {
                    warn!(endpoint = %base, attempt, error = %e, "broker quote attempt failed");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl QuoteClient for SqsClient {
    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, BrokerError> {
        request.validate()?;

        let start = *self.current.read().await;
        match self.try_with_retries(&self.endpoints[start], request).await {
            Ok(quote) => return Ok(quote),
            Err(e) => {
                warn!(endpoint = %self.endpoints[start], error = %e, "current broker endpoint exhausted");
            }
        }

        // Probe the remaining endpoints in configured order, switch to the
        // first live one and re-issue the request once.
        for idx in 0..self.endpoints.len() {
            if idx == start {
                continue;
            }
            if !self.probe(&self.endpoints[idx]).await {
                continue;
            }
            *self.current.write().await = idx;
            info!(endpoint = %self.endpoints[idx], "switched broker endpoint");
            match self.fetch_quote(&self.endpoints[idx], request).await {
                Ok(quote) => return Ok(quote),
                Err(e) => {
                    warn!(endpoint = %self.endpoints[idx], error = %e, "quote failed after failover");
                }
            }
        }

        Err(BrokerError::Unavailable(format!(
            "{} endpoint(s) tried",
            self.endpoints.len()
        )))
    }
}

/// Query parameters for a validated quote request. Amounts travel as
/// concatenated `<amount><denom>` values; reqwest escapes them.
fn quote_params(request: &QuoteRequest) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let (Some(token_in), Some(out_denom)) = (&request.token_in, &request.token_out_denom) {
        params.push(("tokenIn", token_in.concat()));
        params.push(("tokenOutDenom", out_denom.clone()));
    }
    if let (Some(token_out), Some(in_denom)) = (&request.token_out, &request.token_in_denom) {
        params.push(("tokenOut", token_out.concat()));
        params.push(("tokenInDenom", in_denom.clone()));
    }
    if request.single_route {
        params.push(("singleRoute", "true".to_string()));
    }
    params
}

fn map_response(request: &QuoteRequest, response: SqsQuoteResponse) -> Quote {
    let (denom_in, denom_out) = match (&request.token_in, &request.token_out_denom) {
        (Some(token_in), Some(out_denom)) => (token_in.denom.clone(), out_denom.clone()),
        _ => (
            request
                .token_in_denom
                .clone()
                .unwrap_or_default(),
            request
                .token_out
                .as_ref()
                .map(|c| c.denom.clone())
                .unwrap_or_default(),
        ),
    };

    let routes = response
        .route
        .into_iter()
        .map(|r| SqsRoute {
            pools: r
                .pools
                .into_iter()
                .map(|p| SqsPool {
                    id: p.id,
                    pool_type: p.pool_type,
                    spread_factor: p.spread_factor,
                    taker_fee: p.taker_fee,
                    token_out_denom: p.token_out_denom,
                    liquidity_cap: p.liquidity_cap,
                })
                .collect(),
            in_amount: r.in_amount,
            out_amount: r.out_amount,
            effective_liquidity: r.effective_liquidity,
            overflows: r.overflows.unwrap_or(false),
        })
        .collect();

    Quote {
        denom_in,
        denom_out,
        amount_in: response.amount_in.amount,
        amount_out: response.amount_out,
        price_impact: response.price_impact,
        detail: BrokerQuote::Sqs(SqsQuote {
            routes,
            effective_fee: response.effective_fee,
        }),
    }
}

#[derive(Debug, Deserialize)]
struct SqsQuoteResponse {
    amount_in: SqsCoin,
    amount_out: String,
    route: Vec<SqsRouteResponse>,
    #[serde(default)]
    effective_fee: Option<String>,
    #[serde(default)]
    price_impact: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SqsCoin {
    #[allow(dead_code)]
    denom: String,
    amount: String,
}

#[derive(Debug, Deserialize)]
struct SqsRouteResponse {
    pools: Vec<SqsPoolResponse>,
    in_amount: String,
    out_amount: String,
    #[serde(default)]
    effective_liquidity: Option<String>,
    #[serde(default)]
    overflows: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct SqsPoolResponse {
    id: u64,
    #[serde(rename = "type", default)]
    pool_type: Option<String>,
    #[serde(rename = "spreadFactor", default)]
    spread_factor: Option<String>,
    #[serde(rename = "takerFee", default)]
    taker_fee: Option<String>,
    #[serde(rename = "tokenOutDenom")]
    token_out_denom: String,
    #[serde(rename = "liquidityCap", default)]
    liquidity_cap: Option<String>,
}
