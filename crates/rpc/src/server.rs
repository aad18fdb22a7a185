//! Router assembly and serving

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
};
use tracing::info;
use wayfinder_config::ServiceConfig;

use crate::{handlers, middleware as mw, AppState, RpcServerError};

const SERVICE_PATH: &str = "/wayfinder.v1.RouterService";

/// Build the full router: RPC methods, operational endpoints, middleware.
pub fn build_router(state: AppState, config: &ServiceConfig) -> Router {
    let rpc = Router::new()
        .route(
            &format!("{SERVICE_PATH}/FindPath"),
            get(handlers::find_path_get).post(handlers::find_path),
        )
        .route(
            &format!("{SERVICE_PATH}/LookupDenom"),
            get(handlers::lookup_denom_get).post(handlers::lookup_denom),
        )
        .route(
            &format!("{SERVICE_PATH}/GetTokenDenoms"),
            get(handlers::get_token_denoms_get).post(handlers::get_token_denoms),
        )
        .route(
            &format!("{SERVICE_PATH}/GetChainTokens"),
            get(handlers::get_chain_tokens_get).post(handlers::get_chain_tokens),
        )
        .route(
            &format!("{SERVICE_PATH}/GetChainInfo"),
            get(handlers::get_chain_info_get).post(handlers::get_chain_info),
        )
        .route(
            &format!("{SERVICE_PATH}/ListSupportedChains"),
            get(handlers::list_supported_chains_get).post(handlers::list_supported_chains),
        )
        .route(
            crate::REFLECTION_V1_PATH,
            axum::routing::post(crate::server_reflection),
        )
        .route(
            crate::REFLECTION_V1ALPHA_PATH,
            axum::routing::post(crate::server_reflection),
        );

    let operational = Router::new()
        .route("/server/health", get(handlers::health))
        .route("/server/ready", get(handlers::ready))
        .route("/server/metrics", get(handlers::metrics))
        .route("/server/services", get(handlers::services));

    // Layers apply inside-out: the last `.layer` call is the outermost.
    let mut app = Router::new()
        .merge(rpc)
        .merge(operational)
        .layer(middleware::from_fn(mw::cache_control_middleware));

    if let Some(limit) = config.max_concurrent_requests {
        app = app.layer(ConcurrencyLimitLayer::new(limit));
    }

    if let Some(rpm) = config.rate_limit_per_minute {
        let limiter = Arc::new(mw::RateLimitState::new(rpm));
        app = app.layer(middleware::from_fn_with_state(
            limiter,
            mw::rate_limit_middleware,
        ));
    }

    app.layer(TimeoutLayer::new(Duration::from_secs(
        config.request_timeout_secs,
    )))
    .layer(cors_layer(&config.cors_allowed_origins))
    .layer(middleware::from_fn_with_state(
        state.clone(),
        mw::request_log_middleware,
    ))
    .layer(CatchPanicLayer::custom(|panic| mw::handle_panic(panic)))
    .with_state(state)
}

/// CORS from the configured allow-list; an empty list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// Bind and serve until the shutdown future resolves.
pub async fn serve(
    state: AppState,
    config: &ServiceConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), RpcServerError> {
    let app = build_router(state, config);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| RpcServerError::BindError(e.to_string()))?;

    info!(addr = %config.listen_addr, "RPC surface listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|e| RpcServerError::ServerError(e.to_string()))
}
