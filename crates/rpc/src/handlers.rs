//! RPC method handlers and wire types

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use wayfinder_planner::PlanError;
use wayfinder_topology::{DenomError, Endpoint, WalletInfo};
use wayfinder_types::{ChainDenom, RoutePlan, RouteRequest};

use crate::{codec, pb, AppState, REFLECTION_V1ALPHA_PATH, REFLECTION_V1_PATH};

/// An RPC-level error: a status code plus a stable machine-readable code.
#[derive(Debug)]
pub struct RpcError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl RpcError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "invalid_argument",
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "not_found",
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal",
            message: "internal error".to_string(),
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({
                "code": self.code,
                "message": self.message,
            })),
        )
            .into_response()
    }
}

/// The `?message=` parameter of GET-protocol calls.
#[derive(Debug, Deserialize)]
pub struct GetMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Decode a GET-side message; absent means an empty request object.
fn from_message<T: DeserializeOwned>(message: Option<String>) -> Result<T, RpcError> {
    let raw = message.unwrap_or_else(|| "{}".to_string());
    serde_json::from_str(&raw)
        .map_err(|e| RpcError::invalid_argument(format!("invalid message: {e}")))
}

fn map_plan_error(error: PlanError) -> RpcError {
    debug_assert!(!error.is_in_band(), "in-band errors are not RPC errors");
    RpcError::invalid_argument(error.to_string())
}

// ─── FindPath ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct FindPathResponse {
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub route: Option<RoutePlan>,
}

pub async fn find_path(State(state): State<AppState>, request: Request) -> Response {
    codec::unary::<pb::RouteRequest, pb::FindPathResponse, _, _, _, _>(
        request,
        move |req: RouteRequest| find_path_inner(state, req),
    )
    .await
}

pub async fn find_path_get(
    State(state): State<AppState>,
    Query(query): Query<GetMessage>,
) -> Result<Json<FindPathResponse>, RpcError> {
    let request = from_message(query.message)?;
    find_path_inner(state, request).await.map(Json)
}

async fn find_path_inner(
    state: AppState,
    request: RouteRequest,
) -> Result<FindPathResponse, RpcError> {
    validate_non_empty("chain_from", &request.chain_from)?;
    validate_non_empty("chain_to", &request.chain_to)?;
    validate_non_empty("token_from_denom", &request.token_from_denom)?;
    validate_non_empty("sender", &request.sender)?;
    validate_non_empty("receiver", &request.receiver)?;

    match state.planner.find_path(&request).await {
        Ok(plan) => Ok(FindPathResponse {
            success: true,
            error_message: None,
            route: Some(plan),
        }),
        // A valid request without an answer stays HTTP 200.
        Err(e) if e.is_in_band() => Ok(FindPathResponse {
            success: false,
            error_message: Some(e.to_string()),
            route: None,
        }),
        Err(e) => Err(map_plan_error(e)),
    }
}

fn validate_non_empty(field: &str, value: &str) -> Result<(), RpcError> {
    if value.is_empty() {
        return Err(RpcError::invalid_argument(format!("{field} is required")));
    }
    Ok(())
}

// ─── LookupDenom ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupDenomRequest {
    pub chain_id: String,
    pub denom: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LookupDenomResponse {
    pub found: bool,
    #[serde(default)]
    pub chain_denom: String,
    #[serde(default)]
    pub base_denom: String,
    #[serde(default)]
    pub origin_chain: String,
    #[serde(default)]
    pub is_native: bool,
    #[serde(default)]
    pub ibc_path: String,
    #[serde(default)]
    pub available_on: Vec<ChainDenom>,
}

pub async fn lookup_denom(State(state): State<AppState>, request: Request) -> Response {
    codec::unary::<pb::LookupDenomRequest, pb::LookupDenomResponse, _, _, _, _>(
        request,
        move |req: LookupDenomRequest| async move { lookup_denom_inner(state, req) },
    )
    .await
}

pub async fn lookup_denom_get(
    State(state): State<AppState>,
    Query(query): Query<GetMessage>,
) -> Result<Json<LookupDenomResponse>, RpcError> {
    let request = from_message(query.message)?;
    lookup_denom_inner(state, request).map(Json)
}

fn lookup_denom_inner(
    state: AppState,
    request: LookupDenomRequest,
) -> Result<LookupDenomResponse, RpcError> {
    validate_non_empty("chain_id", &request.chain_id)?;
    validate_non_empty("denom", &request.denom)?;

    let lookup = state
        .planner
        .topology()
        .lookup_denom(&request.chain_id, &request.denom)
        .map_err(|e| match e {
            DenomError::UnknownChain(c) => {
                RpcError::invalid_argument(format!("unknown chain {c:?}"))
            }
            other => RpcError::invalid_argument(other.to_string()),
        })?;

    Ok(match lookup {
        Some(found) => LookupDenomResponse {
            found: true,
            chain_denom: found.chain_denom,
            base_denom: found.base_denom,
            origin_chain: found.origin_chain,
            is_native: found.is_native,
            ibc_path: found.ibc_path,
            available_on: found.available_on,
        },
        None => LookupDenomResponse::default(),
    })
}

// ─── GetTokenDenoms ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct GetTokenDenomsRequest {
    pub base_denom: String,
    pub origin_chain: String,
    #[serde(default)]
    pub on_chain_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetTokenDenomsResponse {
    pub denoms: Vec<ChainDenom>,
}

pub async fn get_token_denoms(State(state): State<AppState>, request: Request) -> Response {
    codec::unary::<pb::GetTokenDenomsRequest, pb::GetTokenDenomsResponse, _, _, _, _>(
        request,
        move |req: GetTokenDenomsRequest| async move { get_token_denoms_inner(state, req) },
    )
    .await
}

pub async fn get_token_denoms_get(
    State(state): State<AppState>,
    Query(query): Query<GetMessage>,
) -> Result<Json<GetTokenDenomsResponse>, RpcError> {
    let request = from_message(query.message)?;
    get_token_denoms_inner(state, request).map(Json)
}

fn get_token_denoms_inner(
    state: AppState,
    request: GetTokenDenomsRequest,
) -> Result<GetTokenDenomsResponse, RpcError> {
    validate_non_empty("base_denom", &request.base_denom)?;
    validate_non_empty("origin_chain", &request.origin_chain)?;

    let denoms = state.planner.topology().token_denoms_across_chains(
        &request.base_denom,
        &request.origin_chain,
        request.on_chain_id.as_deref(),
    );
    Ok(GetTokenDenomsResponse { denoms })
}

// ─── GetChainTokens ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct GetChainTokensRequest {
    pub chain_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetChainTokensResponse {
    pub native_tokens: Vec<NativeTokenInfo>,
    pub ibc_tokens: Vec<IbcTokenInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NativeTokenInfo {
    pub denom: String,
    pub name: String,
    pub symbol: String,
    pub exponent: u32,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub coingecko_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IbcTokenInfo {
    pub denom: String,
    pub base_denom: String,
    pub origin_chain: String,
    pub ibc_path: String,
    pub routable: bool,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub display_symbol: Option<String>,
}

pub async fn get_chain_tokens(State(state): State<AppState>, request: Request) -> Response {
    codec::unary::<pb::GetChainTokensRequest, pb::GetChainTokensResponse, _, _, _, _>(
        request,
        move |req: GetChainTokensRequest| async move { get_chain_tokens_inner(state, req) },
    )
    .await
}

pub async fn get_chain_tokens_get(
    State(state): State<AppState>,
    Query(query): Query<GetMessage>,
) -> Result<Json<GetChainTokensResponse>, RpcError> {
    let request = from_message(query.message)?;
    get_chain_tokens_inner(state, request).map(Json)
}

fn get_chain_tokens_inner(
    state: AppState,
    request: GetChainTokensRequest,
) -> Result<GetChainTokensResponse, RpcError> {
    validate_non_empty("chain_id", &request.chain_id)?;

    let topology = state.planner.topology();
    let chain = topology
        .chain(&request.chain_id)
        .ok_or_else(|| RpcError::not_found(format!("unknown chain {:?}", request.chain_id)))?;

    Ok(GetChainTokensResponse {
        native_tokens: chain
            .native_tokens
            .values()
            .map(|t| NativeTokenInfo {
                denom: t.denom.clone(),
                name: t.name.clone(),
                symbol: t.symbol.clone(),
                exponent: t.exponent,
                icon: t.icon.clone(),
                coingecko_id: t.coingecko_id.clone(),
            })
            .collect(),
        ibc_tokens: chain
            .ibc_tokens
            .values()
            .map(|t| IbcTokenInfo {
                denom: t.denom.clone(),
                base_denom: t.base_denom.clone(),
                origin_chain: t.origin_chain.clone(),
                ibc_path: t.path.clone(),
                routable: t.routable,
                display_name: t.display_name.clone(),
                display_symbol: t.display_symbol.clone(),
            })
            .collect(),
    })
}

// ─── GetChainInfo ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct GetChainInfoRequest {
    pub chain_id: String,
    #[serde(default)]
    pub show_symbols: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetChainInfoResponse {
    pub chain_id: String,
    pub name: String,
    pub registry: String,
    pub slip44: u32,
    pub bech32_prefix: String,
    pub explorer_url: String,
    pub has_pfm: bool,
    pub is_broker: bool,
    #[serde(default)]
    pub broker_id: Option<String>,
    pub rpcs: Vec<Endpoint>,
    pub rest: Vec<Endpoint>,
    #[serde(default)]
    pub wallet: Option<WalletInfo>,
    pub routes: Vec<RouteInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteInfo {
    pub to_chain: String,
    pub channel_id: String,
    pub port_id: String,
    pub connection_id: String,
    pub counterparty_channel_id: String,
    pub allowed_tokens: Vec<AllowedTokenInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AllowedTokenInfo {
    /// Source denom, or its display symbol when `show_symbols` is set.
    pub token: String,
    pub dest_denom: String,
    pub base_denom: String,
    pub origin_chain: String,
}

pub async fn get_chain_info(State(state): State<AppState>, request: Request) -> Response {
    codec::unary::<pb::GetChainInfoRequest, pb::GetChainInfoResponse, _, _, _, _>(
        request,
        move |req: GetChainInfoRequest| async move { get_chain_info_inner(state, req) },
    )
    .await
}

pub async fn get_chain_info_get(
    State(state): State<AppState>,
    Query(query): Query<GetMessage>,
) -> Result<Json<GetChainInfoResponse>, RpcError> {
    let request = from_message(query.message)?;
    get_chain_info_inner(state, request).map(Json)
}

fn get_chain_info_inner(
    state: AppState,
    request: GetChainInfoRequest,
) -> Result<GetChainInfoResponse, RpcError> {
    validate_non_empty("chain_id", &request.chain_id)?;

    let topology = state.planner.topology();
    let chain = topology
        .chain(&request.chain_id)
        .ok_or_else(|| RpcError::not_found(format!("unknown chain {:?}", request.chain_id)))?;

    let symbol_of = |denom: &str| -> Option<String> {
        chain
            .native_tokens
            .get(denom)
            .map(|t| t.symbol.clone())
            .or_else(|| chain.ibc_tokens.get(denom).and_then(|t| t.display_symbol.clone()))
    };

    let routes = chain
        .routes
        .iter()
        .map(|route| RouteInfo {
            to_chain: route.to_chain.clone(),
            channel_id: route.channel_id.clone(),
            port_id: route.port_id.clone(),
            connection_id: route.connection_id.clone(),
            counterparty_channel_id: route.counterparty_channel_id.clone(),
            allowed_tokens: route
                .allowed_tokens
                .iter()
                .map(|(denom, allowed)| AllowedTokenInfo {
                    token: if request.show_symbols {
                        symbol_of(denom).unwrap_or_else(|| denom.clone())
                    } else {
                        denom.clone()
                    },
                    dest_denom: allowed.dest_denom.clone(),
                    base_denom: allowed.base_denom.clone(),
                    origin_chain: allowed.origin_chain.clone(),
                })
                .collect(),
        })
        .collect();

    Ok(GetChainInfoResponse {
        chain_id: chain.id.clone(),
        name: chain.name.clone(),
        registry: chain.registry.clone(),
        slip44: chain.slip44,
        bech32_prefix: chain.bech32_prefix.clone(),
        explorer_url: chain.explorer_url.clone(),
        has_pfm: chain.has_pfm,
        is_broker: chain.is_broker,
        broker_id: chain.broker_id.clone(),
        rpcs: chain.rpcs.clone(),
        rest: chain.rest.clone(),
        wallet: chain.wallet.clone(),
        routes,
    })
}

// ─── ListSupportedChains ────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListSupportedChainsRequest {}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListSupportedChainsResponse {
    pub chains: Vec<String>,
}

pub async fn list_supported_chains(State(state): State<AppState>, request: Request) -> Response {
    codec::unary::<pb::ListSupportedChainsRequest, pb::ListSupportedChainsResponse, _, _, _, _>(
        request,
        move |_req: ListSupportedChainsRequest| async move {
            Ok::<_, RpcError>(list_supported_chains_inner(state))
        },
    )
    .await
}

pub async fn list_supported_chains_get(
    State(state): State<AppState>,
) -> Json<ListSupportedChainsResponse> {
    Json(list_supported_chains_inner(state))
}

fn list_supported_chains_inner(state: AppState) -> ListSupportedChainsResponse {
    ListSupportedChainsResponse {
        chains: state.planner.topology().chain_ids(),
    }
}

// ─── Operational endpoints ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub chains: usize,
    pub routes: usize,
}

pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let topology = state.planner.topology();
    let chains = topology.chain_ids().len();
    Json(ReadyResponse {
        ready: chains > 0,
        chains,
        routes: topology.route_count(),
    })
}

pub async fn metrics(State(state): State<AppState>) -> Result<Response, RpcError> {
    let exported = state
        .metrics
        .export_metrics()
        .map_err(|_| RpcError::internal())?;
    Ok((
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        exported,
    )
        .into_response())
}

/// JSON method catalog, complementing the protobuf reflection dialects.
pub async fn services() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "services": [{
            "name": pb::SERVICE_NAME,
            "methods": [
                "FindPath",
                "LookupDenom",
                "GetTokenDenoms",
                "GetChainTokens",
                "GetChainInfo",
                "ListSupportedChains",
            ],
            "protocols": [
                "POST application/json",
                "GET ?message=",
                "POST application/proto",
                "POST application/grpc-web+proto",
                "POST application/grpc-web+json",
            ],
        }],
        "reflection": [REFLECTION_V1_PATH, REFLECTION_V1ALPHA_PATH],
    }))
}
