//! Mock key-value REST store
//!
//! Simulates the hosted KV service for local runs and manual testing.
//!
//! Wire shape (matching the production store):
//! - GET  /get/{key}  -> {"result": "<stored string>"} or {"result": null}
//! - POST /set/{key}  -> stores the raw body, responds {"result": "OK"}
//! - Bearer auth enforced when --token is given
//!
//! Usage:
//!   cargo run --bin mock-kv -- --port 8079 --token local-dev

use bytes::Bytes;
use clap::Parser;
use http_body_util::{BodyExt, Full};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mock-kv")]
#[command(about = "Mock key-value REST store for local development")]
struct Args {
    /// TCP port to listen on
    #[arg(short, long, default_value = "8079")]
    port: u16,

    /// Bearer token to require; unset accepts everything
    #[arg(short, long)]
    token: Option<String>,
}

struct MockState {
    values: Mutex<HashMap<String, String>>,
    token: Option<String>,
}

fn json_body(status: StatusCode, body: Value) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .expect("static response should not fail")
}

fn authorized(state: &MockState, req: &Request<hyper::body::Incoming>) -> bool {
    let Some(expected) = state.token.as_deref() else {
        return true;
    };
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .is_some_and(|token| token == expected)
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<MockState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    if !authorized(&state, &req) {
        warn!(path = %req.uri().path(), "mock_kv_unauthorized");
        return Ok(json_body(StatusCode::UNAUTHORIZED, json!({ "error": "unauthorized" })));
    }

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    match (method, path.split('/').collect::<Vec<_>>().as_slice()) {
        (Method::GET, ["", "get", key]) => {
            let values = state.values.lock();
            let result = values.get(*key).cloned().map(Value::String).unwrap_or(Value::Null);
            info!(key = %key, found = %result.is_string(), "mock_kv_get");
            Ok(json_body(StatusCode::OK, json!({ "result": result })))
        }
        (Method::POST, ["", "set", key]) => {
            let key = key.to_string();
            let body = match req.into_body().collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(_) => {
                    return Ok(json_body(
                        StatusCode::BAD_REQUEST,
                        json!({ "error": "unreadable body" }),
                    ))
                }
            };
            let raw = String::from_utf8_lossy(&body).to_string();
            info!(key = %key, bytes = %raw.len(), "mock_kv_set");
            state.values.lock().insert(key, raw);
            Ok(json_body(StatusCode::OK, json!({ "result": "OK" })))
        }
        _ => Ok(json_body(StatusCode::NOT_FOUND, json!({ "error": "not found" }))),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();
    let state = Arc::new(MockState { values: Mutex::new(HashMap::new()), token: args.token });

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr).await?;
    info!(port = %args.port, "mock_kv_started");

    loop {
        let (stream, _addr) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let state = state.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let state = state.clone();
                async move { handle_request(req, state).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                warn!(error = %e, "mock_kv_http_error");
            }
        });
    }
}
