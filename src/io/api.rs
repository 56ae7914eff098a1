//! Content HTTP endpoint
//!
//! Exposes the document over REST at /api/content. Uses hyper for the HTTP
//! server. Responses always use the uniform envelope
//! `{"success":true,"data":...}` / `{"success":false,"error":...}`; raw
//! failure detail goes to the logs, localized messages go to the client.

use crate::domain::normalize::normalize_value;
use crate::domain::validate::validate_payload;
use crate::services::gateway::ContentGateway;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};

pub const LOAD_FAILED_MSG: &str = "Не удалось загрузить данные";
pub const SAVE_FAILED_MSG: &str = "Не удалось сохранить данные";
pub const INVALID_PAYLOAD_MSG: &str = "Некорректные данные";
pub const UNAUTHORIZED_MSG: &str = "Требуется авторизация";

/// Uniform response envelope shared by server and editor client.
/// Missing optional keys deserialize as `None` without a `Default` bound
/// on the payload type.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn err(message: &str) -> Self {
        Self { success: false, data: None, error: Some(message.to_string()) }
    }
}

/// Shared state for request handlers
pub struct ApiState {
    gateway: ContentGateway,
    admin_token: Option<String>,
}

impl ApiState {
    pub fn new(gateway: ContentGateway, admin_token: Option<String>) -> Self {
        Self { gateway, admin_token }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &ApiResponse<T>) -> Response<Full<Bytes>> {
    let payload = serde_json::to_vec(body).unwrap_or_else(|_| b"{\"success\":false}".to_vec());
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json; charset=utf-8")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(payload)))
        .expect("static response should not fail")
}

fn authorized(state: &ApiState, req: &Request<hyper::body::Incoming>) -> bool {
    let Some(expected) = state.admin_token.as_deref() else {
        // No token configured: open edits, dev mode only
        return true;
    };
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .is_some_and(|token| token == expected)
}

async fn handle_get(state: &ApiState) -> Response<Full<Bytes>> {
    match state.gateway.read().await {
        Ok(content) => json_response(StatusCode::OK, &ApiResponse::ok(content)),
        Err(e) => {
            error!(error = %e, "content_read_failed");
            json_response::<Value>(StatusCode::INTERNAL_SERVER_ERROR, &ApiResponse::err(LOAD_FAILED_MSG))
        }
    }
}

async fn handle_put(state: &ApiState, body: Bytes) -> Response<Full<Bytes>> {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "content_payload_not_json");
            return json_response::<Value>(
                StatusCode::BAD_REQUEST,
                &ApiResponse::err(INVALID_PAYLOAD_MSG),
            );
        }
    };

    if let Err(e) = validate_payload(&payload) {
        warn!(error = %e, "content_payload_invalid");
        return json_response::<Value>(
            StatusCode::BAD_REQUEST,
            &ApiResponse::err(INVALID_PAYLOAD_MSG),
        );
    }

    let content = normalize_value(Some(&payload));
    match state.gateway.write(&content).await {
        Ok(saved) => {
            info!("content_saved");
            json_response(StatusCode::OK, &ApiResponse::ok(saved))
        }
        Err(e) => {
            error!(error = %e, "content_write_failed");
            json_response::<Value>(
                StatusCode::INTERNAL_SERVER_ERROR,
                &ApiResponse::err(SAVE_FAILED_MSG),
            )
        }
    }
}

/// Handle HTTP requests
async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<ApiState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match (method, path.as_str()) {
        (Method::GET, "/api/content") => Ok(handle_get(&state).await),
        (Method::PUT, "/api/content") => {
            if !authorized(&state, &req) {
                warn!("content_put_unauthorized");
                return Ok(json_response::<Value>(
                    StatusCode::UNAUTHORIZED,
                    &ApiResponse::err(UNAUTHORIZED_MSG),
                ));
            }
            let body = match req.into_body().collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => {
                    warn!(error = %e, "content_body_read_failed");
                    return Ok(json_response::<Value>(
                        StatusCode::BAD_REQUEST,
                        &ApiResponse::err(INVALID_PAYLOAD_MSG),
                    ));
                }
            };
            Ok(handle_put(&state, body).await)
        }
        // CORS preflight for the editor
        (Method::OPTIONS, "/api/content") => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, PUT, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
            .body(Full::new(Bytes::from("")))
            .expect("static response should not fail")),
        (Method::GET, "/health") => Ok(Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from("ok")))
            .expect("static response should not fail")),
        _ => Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::from("Not Found")))
            .expect("static response should not fail")),
    }
}

/// Serve requests on an already-bound listener until shutdown
pub async fn serve(
    listener: TcpListener,
    state: Arc<ApiState>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, _addr)) => {
                        let io = TokioIo::new(stream);
                        let state = state.clone();

                        tokio::spawn(async move {
                            let service = service_fn(move |req| {
                                let state = state.clone();
                                async move { handle_request(req, state).await }
                            });

                            if let Err(e) = http1::Builder::new()
                                .serve_connection(io, service)
                                .await
                            {
                                error!(error = %e, "content_api_http_error");
                            }
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "content_api_accept_error");
                    }
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!("content_api_server_shutdown");
                    return Ok(());
                }
            }
        }
    }
}

/// Bind and start the content API server
pub async fn start_api_server(
    bind_address: &str,
    port: u16,
    state: Arc<ApiState>,
    shutdown: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr: SocketAddr = format!("{bind_address}:{port}").parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!(addr = %addr, "content_api_server_started");
    serve(listener, state, shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::SiteContent;

    #[test]
    fn test_envelope_shapes() {
        let ok = serde_json::to_value(ApiResponse::ok(42)).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["data"], 42);
        assert!(ok.get("error").is_none());

        let err = serde_json::to_value(ApiResponse::<Value>::err("nope")).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "nope");
        assert!(err.get("data").is_none());
    }

    #[test]
    fn test_envelope_deserializes_success() {
        let raw = r#"{"success":true,"data":null,"error":null}"#;
        let parsed: ApiResponse<Option<SiteContent>> = serde_json::from_str(raw).unwrap();
        assert!(parsed.success);
    }

    #[test]
    fn test_envelope_tolerates_absent_optional_keys() {
        // SiteContent has no Default impl, so this only works as long as
        // the envelope never requires one from its payload type.
        let parsed: ApiResponse<SiteContent> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.data.is_none());
        assert!(parsed.error.is_none());
    }
}
