//! Protobuf messages for the binary and gRPC-Web protocols
//!
//! Hand-annotated prost mirrors of the wire model, kept in lockstep with the
//! JSON types by the `From` conversions below. Field numbers are part of the
//! public contract; append, never renumber. The reflection messages at the
//! bottom follow the layout shared by the v1 and v1alpha dialects.

use crate::handlers as wire;

/// Fully qualified name of the routing service.
pub const SERVICE_NAME: &str = "wayfinder.v1.RouterService";

// ─── Requests ───────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RouteRequest {
    #[prost(string, tag = "1")]
    pub chain_from: String,
    #[prost(string, tag = "2")]
    pub token_from_denom: String,
    #[prost(string, tag = "3")]
    pub amount_in: String,
    #[prost(string, tag = "4")]
    pub chain_to: String,
    #[prost(string, optional, tag = "5")]
    pub token_to_denom: Option<String>,
    #[prost(string, tag = "6")]
    pub sender: String,
    #[prost(string, tag = "7")]
    pub receiver: String,
    #[prost(bool, tag = "8")]
    pub smart_route: bool,
    #[prost(uint32, optional, tag = "9")]
    pub slippage_bps: Option<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LookupDenomRequest {
    #[prost(string, tag = "1")]
    pub chain_id: String,
    #[prost(string, tag = "2")]
    pub denom: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetTokenDenomsRequest {
    #[prost(string, tag = "1")]
    pub base_denom: String,
    #[prost(string, tag = "2")]
    pub origin_chain: String,
    #[prost(string, optional, tag = "3")]
    pub on_chain_id: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetChainTokensRequest {
    #[prost(string, tag = "1")]
    pub chain_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetChainInfoRequest {
    #[prost(string, tag = "1")]
    pub chain_id: String,
    #[prost(bool, tag = "2")]
    pub show_symbols: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListSupportedChainsRequest {}

// ─── Route plan ─────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FindPathResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(message, optional, tag = "3")]
    pub route: Option<RoutePlan>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RoutePlan {
    #[prost(oneof = "route_plan::Plan", tags = "1, 2, 3")]
    pub plan: Option<route_plan::Plan>,
}

pub mod route_plan {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Plan {
        #[prost(message, tag = "1")]
        Direct(super::DirectRoute),
        #[prost(message, tag = "2")]
        Indirect(super::IndirectRoute),
        #[prost(message, tag = "3")]
        BrokerSwap(super::BrokerSwapRoute),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DirectRoute {
    #[prost(message, optional, tag = "1")]
    pub transfer: Option<Leg>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IndirectRoute {
    #[prost(string, repeated, tag = "1")]
    pub path: Vec<String>,
    #[prost(message, repeated, tag = "2")]
    pub legs: Vec<Leg>,
    #[prost(bool, tag = "3")]
    pub supports_pfm: bool,
    #[prost(string, tag = "4")]
    pub pfm_start_chain: String,
    #[prost(string, optional, tag = "5")]
    pub pfm_memo: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BrokerSwapRoute {
    #[prost(string, repeated, tag = "1")]
    pub path: Vec<String>,
    #[prost(message, repeated, tag = "2")]
    pub inbound_legs: Vec<Leg>,
    #[prost(message, optional, tag = "3")]
    pub swap: Option<SwapQuote>,
    #[prost(message, repeated, tag = "4")]
    pub outbound_legs: Vec<Leg>,
    #[prost(bool, tag = "5")]
    pub outbound_supports_pfm: bool,
    #[prost(message, optional, tag = "6")]
    pub execution: Option<Execution>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Leg {
    #[prost(string, tag = "1")]
    pub from_chain: String,
    #[prost(string, tag = "2")]
    pub to_chain: String,
    #[prost(string, tag = "3")]
    pub channel: String,
    #[prost(string, tag = "4")]
    pub port: String,
    #[prost(message, optional, tag = "5")]
    pub token: Option<LegToken>,
    #[prost(string, tag = "6")]
    pub amount: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LegToken {
    #[prost(string, tag = "1")]
    pub chain_denom: String,
    #[prost(string, tag = "2")]
    pub base_denom: String,
    #[prost(string, tag = "3")]
    pub origin_chain: String,
    #[prost(bool, tag = "4")]
    pub is_native: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SwapQuote {
    #[prost(string, tag = "1")]
    pub broker: String,
    #[prost(string, tag = "2")]
    pub chain_id: String,
    #[prost(string, tag = "3")]
    pub denom_in: String,
    #[prost(string, tag = "4")]
    pub denom_out: String,
    #[prost(string, tag = "5")]
    pub amount_in: String,
    #[prost(string, tag = "6")]
    pub amount_out: String,
    #[prost(string, optional, tag = "7")]
    pub price_impact: Option<String>,
    #[prost(uint64, tag = "8")]
    pub quoted_at: u64,
    #[prost(oneof = "swap_quote::Detail", tags = "10")]
    pub detail: Option<swap_quote::Detail>,
}

pub mod swap_quote {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Detail {
        #[prost(message, tag = "10")]
        Sqs(super::SqsQuote),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SqsQuote {
    #[prost(message, repeated, tag = "1")]
    pub routes: Vec<SqsRoute>,
    #[prost(string, optional, tag = "2")]
    pub effective_fee: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SqsRoute {
    #[prost(message, repeated, tag = "1")]
    pub pools: Vec<SqsPool>,
    #[prost(string, tag = "2")]
    pub in_amount: String,
    #[prost(string, tag = "3")]
    pub out_amount: String,
    #[prost(string, optional, tag = "4")]
    pub effective_liquidity: Option<String>,
    #[prost(bool, tag = "5")]
    pub overflows: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SqsPool {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(string, optional, tag = "2")]
    pub pool_type: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub spread_factor: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub taker_fee: Option<String>,
    #[prost(string, tag = "5")]
    pub token_out_denom: String,
    #[prost(string, optional, tag = "6")]
    pub liquidity_cap: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Execution {
    #[prost(bool, tag = "1")]
    pub uses_wasm: bool,
    #[prost(string, tag = "2")]
    pub min_output_amount: String,
    #[prost(uint32, tag = "3")]
    pub slippage_bps: u32,
    #[prost(string, optional, tag = "4")]
    pub recover_address: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub memo: Option<String>,
    #[prost(message, optional, tag = "6")]
    pub smart_contract_data: Option<SmartContractData>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SmartContractData {
    #[prost(string, tag = "1")]
    pub chain_id: String,
    #[prost(string, tag = "2")]
    pub contract: String,
    /// JSON encoding of the swap-and-action message.
    #[prost(string, tag = "3")]
    pub msg_json: String,
}

// ─── Other responses ────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChainDenom {
    #[prost(string, tag = "1")]
    pub chain_id: String,
    #[prost(string, tag = "2")]
    pub denom: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LookupDenomResponse {
    #[prost(bool, tag = "1")]
    pub found: bool,
    #[prost(string, tag = "2")]
    pub chain_denom: String,
    #[prost(string, tag = "3")]
    pub base_denom: String,
    #[prost(string, tag = "4")]
    pub origin_chain: String,
    #[prost(bool, tag = "5")]
    pub is_native: bool,
    #[prost(string, tag = "6")]
    pub ibc_path: String,
    #[prost(message, repeated, tag = "7")]
    pub available_on: Vec<ChainDenom>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetTokenDenomsResponse {
    #[prost(message, repeated, tag = "1")]
    pub denoms: Vec<ChainDenom>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetChainTokensResponse {
    #[prost(message, repeated, tag = "1")]
    pub native_tokens: Vec<NativeTokenInfo>,
    #[prost(message, repeated, tag = "2")]
    pub ibc_tokens: Vec<IbcTokenInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NativeTokenInfo {
    #[prost(string, tag = "1")]
    pub denom: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub symbol: String,
    #[prost(uint32, tag = "4")]
    pub exponent: u32,
    #[prost(string, optional, tag = "5")]
    pub icon: Option<String>,
    #[prost(string, optional, tag = "6")]
    pub coingecko_id: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IbcTokenInfo {
    #[prost(string, tag = "1")]
    pub denom: String,
    #[prost(string, tag = "2")]
    pub base_denom: String,
    #[prost(string, tag = "3")]
    pub origin_chain: String,
    #[prost(string, tag = "4")]
    pub ibc_path: String,
    #[prost(bool, tag = "5")]
    pub routable: bool,
    #[prost(string, optional, tag = "6")]
    pub display_name: Option<String>,
    #[prost(string, optional, tag = "7")]
    pub display_symbol: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetChainInfoResponse {
    #[prost(string, tag = "1")]
    pub chain_id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub registry: String,
    #[prost(uint32, tag = "4")]
    pub slip44: u32,
    #[prost(string, tag = "5")]
    pub bech32_prefix: String,
    #[prost(string, tag = "6")]
    pub explorer_url: String,
    #[prost(bool, tag = "7")]
    pub has_pfm: bool,
    #[prost(bool, tag = "8")]
    pub is_broker: bool,
    #[prost(string, optional, tag = "9")]
    pub broker_id: Option<String>,
    #[prost(message, repeated, tag = "10")]
    pub rpcs: Vec<Endpoint>,
    #[prost(message, repeated, tag = "11")]
    pub rest: Vec<Endpoint>,
    #[prost(message, optional, tag = "12")]
    pub wallet: Option<WalletInfo>,
    #[prost(message, repeated, tag = "13")]
    pub routes: Vec<RouteInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Endpoint {
    #[prost(string, tag = "1")]
    pub url: String,
    #[prost(string, optional, tag = "2")]
    pub provider: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WalletInfo {
    #[prost(string, tag = "1")]
    pub gas_price: String,
    #[prost(string, tag = "2")]
    pub fee_denom: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RouteInfo {
    #[prost(string, tag = "1")]
    pub to_chain: String,
    #[prost(string, tag = "2")]
    pub channel_id: String,
    #[prost(string, tag = "3")]
    pub port_id: String,
    #[prost(string, tag = "4")]
    pub connection_id: String,
    #[prost(string, tag = "5")]
    pub counterparty_channel_id: String,
    #[prost(message, repeated, tag = "6")]
    pub allowed_tokens: Vec<AllowedTokenInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AllowedTokenInfo {
    #[prost(string, tag = "1")]
    pub token: String,
    #[prost(string, tag = "2")]
    pub dest_denom: String,
    #[prost(string, tag = "3")]
    pub base_denom: String,
    #[prost(string, tag = "4")]
    pub origin_chain: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListSupportedChainsResponse {
    #[prost(string, repeated, tag = "1")]
    pub chains: Vec<String>,
}

// ─── Request conversions (protobuf to wire) ─────────────────────────────────

impl From<RouteRequest> for wayfinder_types::RouteRequest {
    fn from(r: RouteRequest) -> Self {
        Self {
            chain_from: r.chain_from,
            token_from_denom: r.token_from_denom,
            amount_in: r.amount_in,
            chain_to: r.chain_to,
            token_to_denom: r.token_to_denom,
            sender: r.sender,
            receiver: r.receiver,
            smart_route: r.smart_route,
            slippage_bps: r.slippage_bps,
        }
    }
}

impl From<LookupDenomRequest> for wire::LookupDenomRequest {
    fn from(r: LookupDenomRequest) -> Self {
        Self {
            chain_id: r.chain_id,
            denom: r.denom,
        }
    }
}

impl From<GetTokenDenomsRequest> for wire::GetTokenDenomsRequest {
    fn from(r: GetTokenDenomsRequest) -> Self {
        Self {
            base_denom: r.base_denom,
            origin_chain: r.origin_chain,
            on_chain_id: r.on_chain_id,
        }
    }
}

impl From<GetChainTokensRequest> for wire::GetChainTokensRequest {
    fn from(r: GetChainTokensRequest) -> Self {
        Self {
            chain_id: r.chain_id,
        }
    }
}

impl From<GetChainInfoRequest> for wire::GetChainInfoRequest {
    fn from(r: GetChainInfoRequest) -> Self {
        Self {
            chain_id: r.chain_id,
            show_symbols: r.show_symbols,
        }
    }
}

impl From<ListSupportedChainsRequest> for wire::ListSupportedChainsRequest {
    fn from(_: ListSupportedChainsRequest) -> Self {
        Self {}
    }
}

// ─── Response conversions (wire to protobuf) ────────────────────────────────

impl From<wire::FindPathResponse> for FindPathResponse {
    fn from(r: wire::FindPathResponse) -> Self {
        Self {
            success: r.success,
            error_message: r.error_message.unwrap_or_default(),
            route: r.route.map(Into::into),
        }
    }
}

impl From<wayfinder_types::RoutePlan> for RoutePlan {
    fn from(plan: wayfinder_types::RoutePlan) -> Self {
        use wayfinder_types::RoutePlan as Wire;
        let plan = match plan {
            Wire::Direct(d) => route_plan::Plan::Direct(d.into()),
            Wire::Indirect(i) => route_plan::Plan::Indirect(i.into()),
            Wire::BrokerSwap(b) => route_plan::Plan::BrokerSwap(b.into()),
        };
        Self { plan: Some(plan) }
    }
}

impl From<wayfinder_types::DirectRoute> for DirectRoute {
    fn from(d: wayfinder_types::DirectRoute) -> Self {
        Self {
            transfer: Some(d.transfer.into()),
        }
    }
}

impl From<wayfinder_types::IndirectRoute> for IndirectRoute {
    fn from(i: wayfinder_types::IndirectRoute) -> Self {
        Self {
            path: i.path,
            legs: i.legs.into_iter().map(Into::into).collect(),
            supports_pfm: i.supports_pfm,
            pfm_start_chain: i.pfm_start_chain,
            pfm_memo: i.pfm_memo,
        }
    }
}

impl From<wayfinder_types::BrokerSwapRoute> for BrokerSwapRoute {
    fn from(b: wayfinder_types::BrokerSwapRoute) -> Self {
        Self {
            path: b.path,
            inbound_legs: b.inbound_legs.into_iter().map(Into::into).collect(),
            swap: Some(b.swap.into()),
            outbound_legs: b.outbound_legs.into_iter().map(Into::into).collect(),
            outbound_supports_pfm: b.outbound_supports_pfm,
            execution: Some(b.execution.into()),
        }
    }
}

impl From<wayfinder_types::Leg> for Leg {
    fn from(l: wayfinder_types::Leg) -> Self {
        Self {
            from_chain: l.from_chain,
            to_chain: l.to_chain,
            channel: l.channel,
            port: l.port,
            token: Some(LegToken {
                chain_denom: l.token.chain_denom,
                base_denom: l.token.base_denom,
                origin_chain: l.token.origin_chain,
                is_native: l.token.is_native,
            }),
            amount: l.amount,
        }
    }
}

impl From<wayfinder_types::SwapQuote> for SwapQuote {
    fn from(s: wayfinder_types::SwapQuote) -> Self {
        let wayfinder_types::BrokerQuote::Sqs(detail) = s.detail;
        Self {
            broker: s.broker,
            chain_id: s.chain_id,
            denom_in: s.denom_in,
            denom_out: s.denom_out,
            amount_in: s.amount_in,
            amount_out: s.amount_out,
            price_impact: s.price_impact,
            quoted_at: s.quoted_at,
            detail: Some(swap_quote::Detail::Sqs(detail.into())),
        }
    }
}

impl From<wayfinder_types::SqsQuote> for SqsQuote {
    fn from(q: wayfinder_types::SqsQuote) -> Self {
        Self {
            routes: q.routes.into_iter().map(Into::into).collect(),
            effective_fee: q.effective_fee,
        }
    }
}

impl From<wayfinder_types::SqsRoute> for SqsRoute {
    fn from(r: wayfinder_types::SqsRoute) -> Self {
        Self {
            pools: r.pools.into_iter().map(Into::into).collect(),
            in_amount: r.in_amount,
            out_amount: r.out_amount,
            effective_liquidity: r.effective_liquidity,
            overflows: r.overflows,
        }
    }
}

impl From<wayfinder_types::SqsPool> for SqsPool {
    fn from(p: wayfinder_types::SqsPool) -> Self {
        Self {
            id: p.id,
            pool_type: p.pool_type,
            spread_factor: p.spread_factor,
            taker_fee: p.taker_fee,
            token_out_denom: p.token_out_denom,
            liquidity_cap: p.liquidity_cap,
        }
    }
}

impl From<wayfinder_types::Execution> for Execution {
    fn from(e: wayfinder_types::Execution) -> Self {
        Self {
            uses_wasm: e.uses_wasm,
            min_output_amount: e.min_output_amount,
            slippage_bps: e.slippage_bps,
            recover_address: e.recover_address,
            memo: e.memo,
            smart_contract_data: e.smart_contract_data.map(|d| SmartContractData {
                chain_id: d.chain_id,
                contract: d.contract,
                msg_json: d.msg.to_string(),
            }),
        }
    }
}

impl From<wayfinder_types::ChainDenom> for ChainDenom {
    fn from(d: wayfinder_types::ChainDenom) -> Self {
        Self {
            chain_id: d.chain_id,
            denom: d.denom,
        }
    }
}

impl From<wire::LookupDenomResponse> for LookupDenomResponse {
    fn from(r: wire::LookupDenomResponse) -> Self {
        Self {
            found: r.found,
            chain_denom: r.chain_denom,
            base_denom: r.base_denom,
            origin_chain: r.origin_chain,
            is_native: r.is_native,
            ibc_path: r.ibc_path,
            available_on: r.available_on.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<wire::GetTokenDenomsResponse> for GetTokenDenomsResponse {
    fn from(r: wire::GetTokenDenomsResponse) -> Self {
        Self {
            denoms: r.denoms.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<wire::GetChainTokensResponse> for GetChainTokensResponse {
    fn from(r: wire::GetChainTokensResponse) -> Self {
        Self {
            native_tokens: r
                .native_tokens
                .into_iter()
                .map(|t| NativeTokenInfo {
                    denom: t.denom,
                    name: t.name,
                    symbol: t.symbol,
                    exponent: t.exponent,
                    icon: t.icon,
                    coingecko_id: t.coingecko_id,
                })
                .collect(),
            ibc_tokens: r
                .ibc_tokens
                .into_iter()
                .map(|t| IbcTokenInfo {
                    denom: t.denom,
                    base_denom: t.base_denom,
                    origin_chain: t.origin_chain,
                    ibc_path: t.ibc_path,
                    routable: t.routable,
                    display_name: t.display_name,
                    display_symbol: t.display_symbol,
                })
                .collect(),
        }
    }
}

impl From<wire::GetChainInfoResponse> for GetChainInfoResponse {
    fn from(r: wire::GetChainInfoResponse) -> Self {
        Self {
            chain_id: r.chain_id,
            name: r.name,
            registry: r.registry,
            slip44: r.slip44,
            bech32_prefix: r.bech32_prefix,
            explorer_url: r.explorer_url,
            has_pfm: r.has_pfm,
            is_broker: r.is_broker,
            broker_id: r.broker_id,
            rpcs: r.rpcs.into_iter().map(endpoint_from).collect(),
            rest: r.rest.into_iter().map(endpoint_from).collect(),
            wallet: r.wallet.map(|w| WalletInfo {
                gas_price: w.gas_price,
                fee_denom: w.fee_denom,
            }),
            routes: r
                .routes
                .into_iter()
                .map(|route| RouteInfo {
                    to_chain: route.to_chain,
                    channel_id: route.channel_id,
                    port_id: route.port_id,
                    connection_id: route.connection_id,
                    counterparty_channel_id: route.counterparty_channel_id,
                    allowed_tokens: route
                        .allowed_tokens
                        .into_iter()
                        .map(|t| AllowedTokenInfo {
                            token: t.token,
                            dest_denom: t.dest_denom,
                            base_denom: t.base_denom,
                            origin_chain: t.origin_chain,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

fn endpoint_from(e: wayfinder_topology::Endpoint) -> Endpoint {
    Endpoint {
        url: e.url,
        provider: e.provider,
    }
}

impl From<wire::ListSupportedChainsResponse> for ListSupportedChainsResponse {
    fn from(r: wire::ListSupportedChainsResponse) -> Self {
        Self { chains: r.chains }
    }
}

// ─── Server reflection (v1 and v1alpha share this layout) ───────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerReflectionRequest {
    #[prost(string, tag = "1")]
    pub host: String,
    #[prost(
        oneof = "server_reflection_request::MessageRequest",
        tags = "3, 4, 5, 6, 7"
    )]
    pub message_request: Option<server_reflection_request::MessageRequest>,
}

pub mod server_reflection_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum MessageRequest {
        #[prost(string, tag = "3")]
        FileByFilename(String),
        #[prost(string, tag = "4")]
        FileContainingSymbol(String),
        #[prost(message, tag = "5")]
        FileContainingExtension(super::ExtensionRequest),
        #[prost(string, tag = "6")]
        AllExtensionNumbersOfType(String),
        #[prost(string, tag = "7")]
        ListServices(String),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExtensionRequest {
    #[prost(string, tag = "1")]
    pub containing_type: String,
    #[prost(int32, tag = "2")]
    pub extension_number: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerReflectionResponse {
    #[prost(string, tag = "1")]
    pub valid_host: String,
    #[prost(message, optional, tag = "2")]
    pub original_request: Option<ServerReflectionRequest>,
    #[prost(
        oneof = "server_reflection_response::MessageResponse",
        tags = "4, 5, 6, 7"
    )]
    pub message_response: Option<server_reflection_response::MessageResponse>,
}

pub mod server_reflection_response {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum MessageResponse {
        #[prost(message, tag = "4")]
        FileDescriptorResponse(super::FileDescriptorResponse),
        #[prost(message, tag = "5")]
        AllExtensionNumbersResponse(super::ExtensionNumberResponse),
        #[prost(message, tag = "6")]
        ListServicesResponse(super::ListServiceResponse),
        #[prost(message, tag = "7")]
        ErrorResponse(super::ErrorResponse),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDescriptorResponse {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub file_descriptor_proto: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExtensionNumberResponse {
    #[prost(string, tag = "1")]
    pub base_type_name: String,
    #[prost(int32, repeated, tag = "2")]
    pub extension_number: Vec<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListServiceResponse {
    #[prost(message, repeated, tag = "1")]
    pub service: Vec<ServiceResponse>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceResponse {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ErrorResponse {
    #[prost(int32, tag = "1")]
    pub error_code: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_route_request_round_trip() {
        let request = RouteRequest {
            chain_from: "osmosis-1".to_string(),
            token_from_denom: "uosmo".to_string(),
            amount_in: "100000".to_string(),
            chain_to: "cosmoshub-4".to_string(),
            token_to_denom: Some("uatom".to_string()),
            sender: "osmo1sender".to_string(),
            receiver: "cosmos1receiver".to_string(),
            smart_route: true,
            slippage_bps: Some(50),
        };

        let decoded = RouteRequest::decode(request.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, request);

        let wire: wayfinder_types::RouteRequest = decoded.into();
        assert_eq!(wire.chain_from, "osmosis-1");
        assert_eq!(wire.slippage_bps, Some(50));
    }

    #[test]
    fn test_find_path_response_round_trip() {
        let response = FindPathResponse {
            success: true,
            error_message: String::new(),
            route: Some(RoutePlan {
                plan: Some(route_plan::Plan::Direct(DirectRoute {
                    transfer: Some(Leg {
                        from_chain: "osmosis-1".to_string(),
                        to_chain: "atomone-1".to_string(),
                        channel: "channel-94814".to_string(),
                        port: "transfer".to_string(),
                        token: Some(LegToken {
                            chain_denom: "ibc/BC26".to_string(),
                            base_denom: "uatone".to_string(),
                            origin_chain: "atomone-1".to_string(),
                            is_native: false,
                        }),
                        amount: "100000".to_string(),
                    }),
                })),
            }),
        };

        let decoded = FindPathResponse::decode(response.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_empty_request_decodes_to_default() {
        let decoded = ListSupportedChainsRequest::decode(&[][..]).unwrap();
        assert_eq!(decoded, ListSupportedChainsRequest::default());
    }

    #[test]
    fn test_reflection_list_services_round_trip() {
        let request = ServerReflectionRequest {
            host: String::new(),
            message_request: Some(server_reflection_request::MessageRequest::ListServices(
                "*".to_string(),
            )),
        };

        let decoded =
            ServerReflectionRequest::decode(request.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, request);
    }
}
