//! Request middleware: client IP extraction, per-IP rate limiting,
//! cache-control stamping, request logging, panic recovery.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::AppState;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Per-IP rate limiter state.
pub struct RateLimitState {
    requests_per_minute: u32,
    ip_limiters: RwLock<HashMap<String, Arc<DirectLimiter>>>,
}

impl RateLimitState {
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute: requests_per_minute.max(1),
            ip_limiters: RwLock::new(HashMap::new()),
        }
    }

    async fn check(&self, key: &str) -> Result<(), RateLimitError> {
        let limiter = {
            let limiters = self.ip_limiters.read().await;
            limiters.get(key).cloned()
        };

        let limiter = match limiter {
            Some(limiter) => limiter,
            None => {
                let quota = Quota::per_minute(
                    NonZeroU32::new(self.requests_per_minute).expect("clamped to at least 1"),
                );
                let new_limiter = Arc::new(RateLimiter::direct(quota));
                let mut limiters = self.ip_limiters.write().await;
                limiters
                    .entry(key.to_string())
                    .or_insert_with(|| new_limiter.clone())
                    .clone()
            }
        };

        limiter.check().map_err(|_| RateLimitError {
            limit: self.requests_per_minute,
            reset_seconds: 60,
        })
    }
}

#[derive(Debug)]
pub struct RateLimitError {
    pub limit: u32,
    pub reset_seconds: u32,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "code": "resource_exhausted",
            "message": "too many requests",
            "limit": self.limit,
        });
        (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, self.reset_seconds.to_string())],
            Json(body),
        )
            .into_response()
    }
}

/// Rate limiting middleware keyed by the public client IP.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimitState>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    match limiter.check(&ip).await {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

/// The public client IP: `CF-Connecting-IP`, then the first entry of
/// `X-Forwarded-For`, then the peer address.
pub fn client_ip(request: &Request) -> String {
    if let Some(ip) = header_ip(request.headers(), "cf-connecting-ip") {
        return ip;
    }
    if let Some(forwarded) = request.headers().get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(ip) = value.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn header_ip(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Stamp every response as uncacheable: route answers are time-valued.
pub async fn cache_control_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );
    response
}

/// Structured per-request log with procedure name, protocol, duration and
/// outcome; feeds the request metrics.
pub async fn request_log_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let procedure = request
        .uri()
        .path()
        .rsplit('/')
        .next()
        .unwrap_or("unknown")
        .to_string();
    let protocol = request.method().as_str().to_string();
    let ip = client_ip(&request);

    let response = next.run(request).await;

    let duration = started.elapsed();
    let status = response.status();
    let outcome = if status.is_success() { "ok" } else { "error" };
    state.metrics.record_request(&procedure, outcome, duration);

    info!(
        procedure = %procedure,
        protocol = %protocol,
        status = status.as_u16(),
        duration_ms = duration.as_millis() as u64,
        client_ip = %ip,
        "handled request"
    );

    response
}

/// Panic recovery response: a generic internal error, no stack leakage.
pub fn handle_panic(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("panic while serving request");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "code": "internal",
            "message": "internal error",
        })),
    )
        .into_response()
}
