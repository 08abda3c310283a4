//! Request and response types for the requester.
//!
//! # Design
//! A `Request` is plain data built once through the fluent methods below and
//! then handed to `Requester::send`, which consumes it. The builder replaces
//! the overload family an OO API would grow (with/without auth, with/without
//! body): every optional aspect of a request is an optional field with a
//! documented default.
//!
//! All fields use owned types (`String`, `Vec`, `Bytes`) so requests and
//! responses can move freely across task boundaries.

use bytes::Bytes;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A single HTTP request described as plain data.
///
/// Defaults: method `GET`, no body, no extra headers, no credentials. The
/// `Accept` header is not part of the request; it comes from the
/// [`Requester`](crate::Requester) instance unless a header named `accept`
/// is set here, which takes precedence.
#[derive(Debug, Clone)]
pub struct Request {
    pub url: String,
    pub method: Method,
    pub body: Option<String>,
    /// Header names are unique; [`Request::header`] replaces an existing
    /// entry with the same name (ASCII case-insensitive).
    pub headers: Vec<(String, String)>,
    pub auth_user: Option<String>,
    pub auth_password: Option<String>,
}

impl Request {
    pub fn new(url: impl Into<String>, method: Method) -> Self {
        Self {
            url: url.into(),
            method,
            body: None,
            headers: Vec::new(),
            auth_user: None,
            auth_password: None,
        }
    }

    /// Shorthand for the most common case, a plain GET.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, Method::Get)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a header, replacing any existing header with the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Attach HTTP Basic credentials. The `Authorization` header is only
    /// emitted when both values are non-empty; see `Requester::send`.
    pub fn basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth_user = Some(user.into());
        self.auth_password = Some(password.into());
        self
    }
}

/// A fully buffered HTTP response.
///
/// Any status code, 4xx and 5xx included, is a completed exchange;
/// interpreting the status is the caller's job.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Bytes,
}
