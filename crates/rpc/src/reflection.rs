//! gRPC server reflection, served for both common dialects
//!
//! The v1 and v1alpha dialects share one message layout, so a single handler
//! backs both paths. List-services queries are answered from the static
//! service table; file-descriptor queries report UNIMPLEMENTED, since the
//! messages here are hand-maintained rather than compiled from descriptors.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use prost::Message;

use crate::codec::{error_response, frame, unframe, Protocol};
use crate::pb;
use crate::RpcError;

pub const REFLECTION_V1_PATH: &str = "/grpc.reflection.v1.ServerReflection/ServerReflectionInfo";
pub const REFLECTION_V1ALPHA_PATH: &str =
    "/grpc.reflection.v1alpha.ServerReflection/ServerReflectionInfo";

/// gRPC UNIMPLEMENTED.
const GRPC_UNIMPLEMENTED: i32 = 12;

/// Handler behind both reflection paths. Protobuf codecs only; reflection
/// clients do not speak JSON.
pub async fn server_reflection(request: Request) -> Response {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let protocol = match Protocol::negotiate(content_type.as_deref()) {
        Some(p) if p != Protocol::Json && p != Protocol::GrpcWebJson => p,
        _ => {
            return RpcError {
                status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                code: "invalid_argument",
                message: "reflection is served over the protobuf codecs only".to_string(),
            }
            .into_response()
        }
    };

    let body = match axum::body::to_bytes(request.into_body(), 64 * 1024).await {
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

    let reflection_request = match pb::ServerReflectionRequest::decode(payload) {
        Ok(request) => request,
        Err(e) => {
            return error_response(
                protocol,
                RpcError::invalid_argument(format!("invalid reflection request: {e}")),
            )
        }
    };

    let encoded = reflect(reflection_request).encode_to_vec();

    match protocol {
        Protocol::Proto => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/proto")],
            encoded,
        )
            .into_response(),
        _ => {
            let mut framed = frame(0x00, &encoded);
            framed.extend_from_slice(&frame(0x80, b"grpc-status: 0\r\n"));
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, protocol.content_type())],
                framed,
            )
                .into_response()
        }
    }
}

/// Names announced through reflection.
fn service_names() -> Vec<&'static str> {
    vec![
        pb::SERVICE_NAME,
        "grpc.reflection.v1.ServerReflection",
        "grpc.reflection.v1alpha.ServerReflection",
    ]
}

fn reflect(request: pb::ServerReflectionRequest) -> pb::ServerReflectionResponse {
    use pb::server_reflection_request::MessageRequest;
    use pb::server_reflection_response::MessageResponse;

    let message_response = match &request.message_request {
        Some(MessageRequest::ListServices(_)) | None => {
            MessageResponse::ListServicesResponse(pb::ListServiceResponse {
                service: service_names()
                    .into_iter()
                    .map(|name| pb::ServiceResponse {
                        name: name.to_string(),
                    })
                    .collect(),
            })
        }
        Some(_) => MessageResponse::ErrorResponse(pb::ErrorResponse {
            error_code: GRPC_UNIMPLEMENTED,
            error_message: "file descriptors are not served; messages are hand-maintained"
                .to_string(),
        }),
    };

    pb::ServerReflectionResponse {
        valid_host: request.host.clone(),
        original_request: Some(request),
        message_response: Some(message_response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb::server_reflection_request::MessageRequest;
    use pb::server_reflection_response::MessageResponse;

    #[test]
    fn test_list_services() {
        let response = reflect(pb::ServerReflectionRequest {
            host: String::new(),
            message_request: Some(MessageRequest::ListServices("*".to_string())),
        });

        let Some(MessageResponse::ListServicesResponse(list)) = response.message_response else {
            panic!("expected a list-services response");
        };
        let names: Vec<_> = list.service.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&pb::SERVICE_NAME));
        assert!(names.contains(&"grpc.reflection.v1.ServerReflection"));
        assert!(names.contains(&"grpc.reflection.v1alpha.ServerReflection"));
    }

    #[test]
    fn test_file_queries_are_unimplemented() {
        let response = reflect(pb::ServerReflectionRequest {
            host: String::new(),
            message_request: Some(MessageRequest::FileContainingSymbol(
                pb::SERVICE_NAME.to_string(),
            )),
        });

        let Some(MessageResponse::ErrorResponse(error)) = response.message_response else {
            panic!("expected an error response");
        };
        assert_eq!(error.error_code, GRPC_UNIMPLEMENTED);
    }

    #[test]
    fn test_original_request_is_echoed() {
        let request = pb::ServerReflectionRequest {
            host: "localhost".to_string(),
            message_request: Some(MessageRequest::ListServices(String::new())),
        };
        let response = reflect(request.clone());
        assert_eq!(response.valid_host, "localhost");
        assert_eq!(response.original_request, Some(request));
    }
}
