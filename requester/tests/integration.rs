//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the fixture server on a random port and exercises the
//! requester over real HTTP. The `/echo` route reflects the received method,
//! headers, and body, so these tests assert the exact wire shape of the
//! outgoing request rather than trusting the builder alone.

use async_requester::{Method, Request, RequestError, Requester};
use mock_server::Echo;

/// Start the mock server on a random port, return its base URL.
async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_server::run(listener).await.unwrap() });
    format!("http://{addr}")
}

fn parse_echo(body: &[u8]) -> Echo {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn get_ok_delivers_body_and_status() {
    let base = start_server().await;
    let resp = Requester::new()
        .send(Request::get(format!("{base}/ok")))
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(&resp.body[..], br#"{"k":1}"#);
}

#[tokio::test]
async fn not_found_is_a_completion_not_an_error() {
    let base = start_server().await;
    let resp = Requester::new()
        .send(Request::get(format!("{base}/missing")))
        .await
        .unwrap();

    assert_eq!(resp.status, 404);
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn default_method_is_get_on_the_wire() {
    let base = start_server().await;
    let resp = Requester::new()
        .send(Request::get(format!("{base}/echo")))
        .await
        .unwrap();

    let echo = parse_echo(&resp.body);
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.body, "");
}

#[tokio::test]
async fn post_body_is_transmitted_unmodified() {
    let base = start_server().await;
    let payload = r#"{"title":"hello ± wire"}"#;
    let resp = Requester::new()
        .send(Request::new(format!("{base}/echo"), Method::Post).body(payload))
        .await
        .unwrap();

    let echo = parse_echo(&resp.body);
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, payload);
}

#[tokio::test]
async fn put_and_delete_reach_the_wire() {
    let base = start_server().await;
    let requester = Requester::new();

    let resp = requester
        .send(Request::new(format!("{base}/echo"), Method::Put).body("updated"))
        .await
        .unwrap();
    assert_eq!(parse_echo(&resp.body).method, "PUT");

    let resp = requester
        .send(Request::new(format!("{base}/echo"), Method::Delete))
        .await
        .unwrap();
    assert_eq!(parse_echo(&resp.body).method, "DELETE");
}

#[tokio::test]
async fn basic_auth_header_is_encoded_on_the_wire() {
    let base = start_server().await;
    let resp = Requester::new()
        .send(Request::get(format!("{base}/echo")).basic_auth("scout", "hunter2"))
        .await
        .unwrap();

    let echo = parse_echo(&resp.body);
    assert_eq!(
        echo.headers.get("authorization").map(String::as_str),
        Some("Basic c2NvdXQ6aHVudGVyMg==")
    );
}

#[tokio::test]
async fn empty_credential_sends_no_auth_header() {
    let base = start_server().await;
    let resp = Requester::new()
        .send(Request::get(format!("{base}/echo")).basic_auth("scout", ""))
        .await
        .unwrap();

    let echo = parse_echo(&resp.body);
    assert!(!echo.headers.contains_key("authorization"));
}

#[tokio::test]
async fn protected_route_accepts_fixture_credentials() {
    let base = start_server().await;
    let requester = Requester::new();

    let resp = requester
        .send(
            Request::get(format!("{base}/protected"))
                .basic_auth(mock_server::AUTH_USER, mock_server::AUTH_PASSWORD),
        )
        .await
        .unwrap();
    assert_eq!(resp.status, 200);

    // Wrong password still completes — 401 is the caller's problem.
    let resp = requester
        .send(Request::get(format!("{base}/protected")).basic_auth("scout", "wrongpass"))
        .await
        .unwrap();
    assert_eq!(resp.status, 401);
}

#[tokio::test]
async fn default_accept_is_json() {
    let base = start_server().await;
    let resp = Requester::new()
        .send(Request::get(format!("{base}/echo")))
        .await
        .unwrap();

    let echo = parse_echo(&resp.body);
    assert_eq!(
        echo.headers.get("accept").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn instance_accept_override_reaches_the_wire() {
    let base = start_server().await;
    let mut requester = Requester::new();
    requester.set_accept("text/plain");

    let resp = requester
        .send(Request::get(format!("{base}/echo")))
        .await
        .unwrap();

    let echo = parse_echo(&resp.body);
    assert_eq!(echo.headers.get("accept").map(String::as_str), Some("text/plain"));
}

#[tokio::test]
async fn per_request_headers_are_forwarded() {
    let base = start_server().await;
    let resp = Requester::new()
        .send(Request::get(format!("{base}/echo")).header("x-request-id", "req-42"))
        .await
        .unwrap();

    let echo = parse_echo(&resp.body);
    assert_eq!(echo.headers.get("x-request-id").map(String::as_str), Some("req-42"));
}

#[tokio::test]
async fn concurrent_requests_complete_independently() {
    let base = start_server().await;
    let requester = Requester::new();

    let first = requester.send(Request::new(format!("{base}/echo"), Method::Post).body("first payload"));
    let second = requester.send(Request::new(format!("{base}/echo"), Method::Post).body("second payload"));
    let (first, second) = tokio::join!(first, second);

    assert_eq!(parse_echo(&first.unwrap().body).body, "first payload");
    assert_eq!(parse_echo(&second.unwrap().body).body, "second payload");
}

#[tokio::test]
async fn dns_failure_surfaces_as_transport_error() {
    // .invalid never resolves (RFC 2606).
    let err = Requester::new()
        .send(Request::get("http://unreachable.invalid/"))
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Transport { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn timeout_surfaces_as_transport_error() {
    let base = start_server().await;
    let mut requester = Requester::new();
    requester.set_timeout(std::time::Duration::from_millis(200));

    let err = requester
        .send(Request::get(format!("{base}/slow")))
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Transport { .. }));
}
