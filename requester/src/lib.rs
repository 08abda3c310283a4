//! Asynchronous HTTP request helper.
//!
//! # Overview
//! Issues a single HTTP request (optionally with Basic authentication,
//! custom headers, and a body), buffers the full response, and settles with
//! exactly one of two outcomes: a [`Response`] carrying the raw body bytes
//! and status code, or a [`RequestError`] for a transport-level failure.
//! HTTP error statuses (4xx/5xx) are completions, not errors.
//!
//! # Design
//! - [`Request`] is one plain-data value with optional fields and a fluent
//!   builder, not a family of overloaded entry points.
//! - [`Requester::send`] is a plain `async fn` returning `Result`, which is
//!   the "exactly one of two outcomes" contract in type form.
//! - [`Requester::send_detached`] re-exposes that contract as a pair of
//!   `FnOnce` callbacks for fire-and-forget use.
//! - No retries, no redirect policy, no streaming, no cancellation; each
//!   request owns its buffer, so concurrent sends are independent.

pub mod client;
pub mod error;
pub mod http;

pub use client::Requester;
pub use error::RequestError;
pub use http::{Method, Request, Response};
