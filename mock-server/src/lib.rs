//! Fixture HTTP server for requester integration tests.
//!
//! # Design
//! Stateless — every route computes its response from the incoming request
//! alone, so tests never interfere with each other. `/echo` reflects the
//! received method, headers, and body back as JSON, letting client tests
//! assert the exact wire shape of what they sent. `/protected` hardcodes one
//! credential pair ([`AUTH_USER`] / [`AUTH_PASSWORD`]) so the Basic-auth
//! path can be exercised end to end.

use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Username `/protected` accepts.
pub const AUTH_USER: &str = "scout";
/// Password `/protected` accepts.
pub const AUTH_PASSWORD: &str = "hunter2";

/// What `/echo` saw on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/ok", get(ok))
        .route("/missing", any(missing))
        .route("/echo", any(echo))
        .route("/protected", get(protected))
        .route("/slow", get(slow))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn ok() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], r#"{"k":1}"#)
}

async fn missing() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        headers,
        body,
    })
}

async fn protected(headers: HeaderMap) -> StatusCode {
    let expected = format!(
        "Basic {}",
        STANDARD.encode(format!("{AUTH_USER}:{AUTH_PASSWORD}"))
    );
    match headers.get(header::AUTHORIZATION) {
        Some(value) if value.as_bytes() == expected.as_bytes() => StatusCode::OK,
        _ => StatusCode::UNAUTHORIZED,
    }
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(2)).await;
    "slow response"
}
