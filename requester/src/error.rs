//! Error type for the requester.
//!
//! # Design
//! HTTP-level error statuses (4xx/5xx) are deliberately NOT errors — they
//! come back as a normal `Response` and the caller interprets the status.
//! `RequestError` covers only what prevents an exchange from completing:
//! a request that cannot be built (`InvalidUrl`, `InvalidHeader`) or a
//! transport-level failure (DNS, connection, timeout, TLS, interrupted
//! transfer), with the underlying cause preserved through `source()`.

use thiserror::Error;

/// Failure to complete an HTTP exchange. Exactly one `RequestError` or one
/// `Response` is produced per `send`, never both.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request URL is not a syntactically valid absolute URL.
    /// Detected before any I/O happens.
    #[error("invalid URL {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A header name or value cannot be encoded onto the wire.
    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },

    /// The network exchange failed: DNS resolution, connection, timeout,
    /// TLS, or an interrupted transfer. Never retried internally.
    #[error("transport failure for {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
