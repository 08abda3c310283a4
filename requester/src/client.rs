//! Asynchronous HTTP requester.
//!
//! # Design
//! `Requester` holds a `reqwest::Client`, the instance-wide `Accept` default,
//! and an optional timeout; it carries no per-request state. Each call to
//! [`Requester::send`] owns its `Request` and its response buffer outright,
//! so concurrent sends never share mutable state and need no locks.
//!
//! `send` is the whole contract: exactly one `Response` or exactly one
//! `RequestError` per call, never both. [`Requester::send_detached`] wraps
//! the same contract in a fire-and-forget callback surface for callers that
//! do not want to hold the future themselves.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::RequestError;
use crate::http::{Method, Request, Response};

const DEFAULT_ACCEPT: &str = "application/json";

/// Issues HTTP requests asynchronously and buffers the full response.
///
/// Cloning is cheap; clones share the underlying connection handling of
/// `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct Requester {
    client: reqwest::Client,
    accept: String,
    timeout: Option<Duration>,
}

impl Requester {
    /// A requester with the default `Accept` of `application/json` and the
    /// networking stack's default timeout behavior.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            accept: DEFAULT_ACCEPT.to_string(),
            timeout: None,
        }
    }

    /// Override the `Accept` header sent with every request from this
    /// instance. A per-request `accept` header still takes precedence.
    pub fn set_accept(&mut self, accept: impl Into<String>) {
        self.accept = accept.into();
    }

    /// Set a total per-request timeout. Unset by default, leaving whatever
    /// the underlying stack does.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Perform the exchange and buffer the full response body.
    ///
    /// Any status code, 4xx and 5xx included, resolves to `Ok`; only
    /// transport-level failures (DNS, connection, timeout, TLS, interrupted
    /// transfer) and unbuildable requests resolve to `Err`. No retries.
    pub async fn send(&self, request: Request) -> Result<Response, RequestError> {
        url::Url::parse(&request.url).map_err(|source| RequestError::InvalidUrl {
            url: request.url.clone(),
            source,
        })?;
        let headers = self.header_map(&request)?;
        let Request { url, method, body, .. } = request;

        debug!(%url, method = method.as_str(), "sending request");
        let mut builder = self
            .client
            .request(to_reqwest(method), url.as_str())
            .headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|source| {
            debug!(%url, error = %source, "request failed");
            RequestError::Transport { url: url.clone(), source }
        })?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|source| {
            debug!(%url, error = %source, "body transfer failed");
            RequestError::Transport { url: url.clone(), source }
        })?;
        debug!(%url, status, len = body.len(), "request completed");

        Ok(Response { status, body })
    }

    /// Fire-and-forget variant: returns immediately and spawns the exchange
    /// onto the current tokio runtime. Exactly one of the two callbacks
    /// runs, on the runtime's context, once the exchange settles.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send_detached<C, E>(&self, request: Request, on_complete: C, on_error: E) -> JoinHandle<()>
    where
        C: FnOnce(Response) + Send + 'static,
        E: FnOnce(RequestError) + Send + 'static,
    {
        let requester = self.clone();
        tokio::spawn(async move {
            match requester.send(request).await {
                Ok(response) => on_complete(response),
                Err(err) => on_error(err),
            }
        })
    }

    /// Assemble the outgoing header map: instance `Accept` first, then the
    /// request's own headers (an `accept` entry there wins), then Basic
    /// auth iff both credentials are non-empty.
    fn header_map(&self, request: &Request) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();
        let accept = HeaderValue::from_str(&self.accept).map_err(|_| RequestError::InvalidHeader {
            name: header::ACCEPT.to_string(),
        })?;
        headers.insert(header::ACCEPT, accept);

        for (name, value) in &request.headers {
            let parsed_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| RequestError::InvalidHeader { name: name.clone() })?;
            let parsed_value = HeaderValue::from_str(value)
                .map_err(|_| RequestError::InvalidHeader { name: name.clone() })?;
            headers.insert(parsed_name, parsed_value);
        }

        if let (Some(user), Some(password)) = (&request.auth_user, &request.auth_password) {
            if !user.is_empty() && !password.is_empty() {
                headers.insert(header::AUTHORIZATION, basic_auth_value(user, password)?);
            }
        }

        Ok(headers)
    }
}

impl Default for Requester {
    fn default() -> Self {
        Self::new()
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// `Basic <base64(user:password)>` per the HTTP Basic authentication scheme.
fn basic_auth_value(user: &str, password: &str) -> Result<HeaderValue, RequestError> {
    let token = STANDARD.encode(format!("{user}:{password}"));
    HeaderValue::from_str(&format!("Basic {token}")).map_err(|_| RequestError::InvalidHeader {
        name: header::AUTHORIZATION.to_string(),
    })
}
