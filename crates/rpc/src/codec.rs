//! RPC protocol negotiation and message framing
//!
//! Every method is served over three protocols, switched on the request
//! content type:
//! - `application/json`: plain JSON bodies;
//! - `application/proto`: binary protobuf bodies, errors as the JSON error
//!   envelope with an HTTP status;
//! - `application/grpc-web[+proto|+json]`: 5-byte message framing with the
//!   trailers carried in the body (`grpc-status` / `grpc-message`).

use std::future::Future;

use axum::{
    body::Bytes,
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use prost::Message;
use serde::{de::DeserializeOwned, Serialize};

use crate::RpcError;

/// Request bodies larger than this are rejected outright.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Uncompressed gRPC-Web message frame.
const FRAME_MESSAGE: u8 = 0x00;

/// gRPC-Web trailers frame.
const FRAME_TRAILERS: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Protocol {
    Json,
    Proto,
    GrpcWebProto,
    GrpcWebJson,
}

impl Protocol {
    /// Negotiate from the request content type; absent means JSON.
    pub(crate) fn negotiate(content_type: Option<&str>) -> Option<Self> {
        let content_type = content_type.unwrap_or("application/json");
        let base = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim();
        match base {
            "application/json" => Some(Protocol::Json),
            "application/proto" => Some(Protocol::Proto),
            "application/grpc-web" | "application/grpc-web+proto" => Some(Protocol::GrpcWebProto),
            "application/grpc-web+json" => Some(Protocol::GrpcWebJson),
            _ => None,
        }
    }

    pub(crate) fn is_grpc_web(self) -> bool {
        matches!(self, Protocol::GrpcWebProto | Protocol::GrpcWebJson)
    }

    fn is_proto_codec(self) -> bool {
        matches!(self, Protocol::Proto | Protocol::GrpcWebProto)
    }

    pub(crate) fn content_type(self) -> &'static str {
        match self {
            Protocol::Json => "application/json",
            Protocol::Proto => "application/proto",
            Protocol::GrpcWebProto => "application/grpc-web+proto",
            Protocol::GrpcWebJson => "application/grpc-web+json",
        }
    }
}

/// Serve one unary RPC over whichever protocol the request speaks.
pub(crate) async fn unary<ReqPb, RespPb, Req, Resp, H, Fut>(
    request: Request,
    handler: H,
) -> Response
where
    ReqPb: Message + Default,
    RespPb: Message + From<Resp>,
    Req: DeserializeOwned + From<ReqPb>,
    Resp: Serialize,
    H: FnOnce(Req) -> Fut,
    Fut: Future<Output = Result<Resp, RpcError>>,
{
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let Some(protocol) = Protocol::negotiate(content_type.as_deref()) else {
        return RpcError {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            code: "invalid_argument",
            message: format!(
                "unsupported content type {:?}",
                content_type.unwrap_or_default()
            ),
        }
        .into_response();
    };

    let body = match axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(_) => {
            return error_response(protocol, RpcError::invalid_argument("unreadable request body"))
        }
    };

    let payload: &[u8] = if protocol.is_grpc_web() {
        match unframe(&body) {
            Ok(payload) => payload,
            Err(e) => return error_response(protocol, e),
        }
    } else {
        &body
    };

    let decoded: Req = if protocol.is_proto_codec() {
        match ReqPb::decode(payload) {
            Ok(pb) => pb.into(),
            Err(e) => {
                return error_response(
                    protocol,
                    RpcError::invalid_argument(format!("invalid protobuf message: {e}")),
                )
            }
        }
    } else {
        let raw: &[u8] = if payload.is_empty() { b"{}" } else { payload };
        match serde_json::from_slice(raw) {
            Ok(req) => req,
            Err(e) => {
                return error_response(
                    protocol,
                    RpcError::invalid_argument(format!("invalid message: {e}")),
                )
            }
        }
    };

    match handler(decoded).await {
        Ok(response) => success_response::<RespPb, Resp>(protocol, response),
        Err(e) => error_response(protocol, e),
    }
}

fn success_response<RespPb, Resp>(protocol: Protocol, response: Resp) -> Response
where
    RespPb: Message + From<Resp>,
    Resp: Serialize,
{
    let payload = if protocol.is_proto_codec() {
        RespPb::from(response).encode_to_vec()
    } else {
        match serde_json::to_vec(&response) {
            Ok(payload) => payload,
            Err(_) => return error_response(protocol, RpcError::internal()),
        }
    };

    match protocol {
        Protocol::Json => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            payload,
        )
            .into_response(),
        Protocol::Proto => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/proto")],
            payload,
        )
            .into_response(),
        Protocol::GrpcWebProto | Protocol::GrpcWebJson => {
            let mut body = frame(FRAME_MESSAGE, &payload);
            body.extend_from_slice(&frame(FRAME_TRAILERS, b"grpc-status: 0\r\n"));
            grpc_web_response(protocol, body)
        }
    }
}

pub(crate) fn error_response(protocol: Protocol, error: RpcError) -> Response {
    if !protocol.is_grpc_web() {
        // The JSON error envelope serves both plain codecs.
        return error.into_response();
    }

    let message = error.message.replace(['\r', '\n'], " ");
    let trailers = format!(
        "grpc-status: {}\r\ngrpc-message: {}\r\n",
        grpc_status(&error),
        message
    );
    grpc_web_response(protocol, frame(FRAME_TRAILERS, trailers.as_bytes()))
}

fn grpc_web_response(protocol: Protocol, body: Vec<u8>) -> Response {
    let mut response = (StatusCode::OK, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(protocol.content_type()),
    );
    response
}

/// Map the HTTP-level error onto the gRPC status space.
fn grpc_status(error: &RpcError) -> u32 {
    match error.code {
        "invalid_argument" => 3,
        "not_found" => 5,
        "resource_exhausted" => 8,
        "internal" => 13,
        _ => 2,
    }
}

/// 5-byte framing: flag byte plus big-endian u32 payload length.
pub(crate) fn frame(flag: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(5 + payload.len());
    out.push(flag);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Extract the first message frame of a gRPC-Web request body.
pub(crate) fn unframe(body: &Bytes) -> Result<&[u8], RpcError> {
    if body.len() < 5 {
        return Err(RpcError::invalid_argument("truncated grpc-web frame"));
    }
    if body[0] & FRAME_TRAILERS != 0 {
        return Err(RpcError::invalid_argument(
            "unexpected trailers frame in request",
        ));
    }
    let len = u32::from_be_bytes(body[1..5].try_into().expect("four length bytes")) as usize;
    body.get(5..5 + len)
        .ok_or_else(|| RpcError::invalid_argument("grpc-web frame shorter than its length"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negotiate_table() {
        assert_eq!(Protocol::negotiate(None), Some(Protocol::Json));
        assert_eq!(
            Protocol::negotiate(Some("application/json")),
            Some(Protocol::Json)
        );
        assert_eq!(
            Protocol::negotiate(Some("application/json; charset=utf-8")),
            Some(Protocol::Json)
        );
        assert_eq!(
            Protocol::negotiate(Some("application/proto")),
            Some(Protocol::Proto)
        );
        assert_eq!(
            Protocol::negotiate(Some("application/grpc-web")),
            Some(Protocol::GrpcWebProto)
        );
        assert_eq!(
            Protocol::negotiate(Some("application/grpc-web+proto")),
            Some(Protocol::GrpcWebProto)
        );
        assert_eq!(
            Protocol::negotiate(Some("application/grpc-web+json")),
            Some(Protocol::GrpcWebJson)
        );
        assert_eq!(Protocol::negotiate(Some("text/plain")), None);
    }

    #[test]
    fn test_frame_round_trip() {
        let body = Bytes::from(frame(FRAME_MESSAGE, b"hello"));
        assert_eq!(unframe(&body).unwrap(), b"hello");
    }

    #[test]
    fn test_unframe_rejects_truncation() {
        let mut framed = frame(FRAME_MESSAGE, b"hello");
        framed.truncate(7);
        assert!(unframe(&Bytes::from(framed)).is_err());
        assert!(unframe(&Bytes::from_static(b"\x00\x00")).is_err());
    }

    #[test]
    fn test_unframe_rejects_trailers_frame() {
        let body = Bytes::from(frame(FRAME_TRAILERS, b"grpc-status: 0\r\n"));
        assert!(unframe(&body).is_err());
    }

    #[test]
    fn test_grpc_status_mapping() {
        assert_eq!(grpc_status(&RpcError::invalid_argument("x")), 3);
        assert_eq!(grpc_status(&RpcError::not_found("x")), 5);
        assert_eq!(grpc_status(&RpcError::internal()), 13);
    }
}
