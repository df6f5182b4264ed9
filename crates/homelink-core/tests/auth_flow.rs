//! Session and retry behavior against a scripted HTTP stub server.
//!
//! The stub answers one connection per canned response, in order, and
//! records every request line plus the bearer token it carried, so the
//! tests can pin down exactly how many calls were made and with which
//! credentials.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use homelink_core::{ApiClient, ClientError, Config};

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    bearer: String,
}

struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    /// Serve the given (status, body) responses in order, one
    /// connection each. Connections beyond the script are refused.
    async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                if let Some(recorded) = read_request(&mut stream).await {
                    log.lock().await.push(recorded);
                }
                let reason = match status {
                    200 => "OK",
                    401 => "Unauthorized",
                    403 => "Forbidden",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\n\
                     content-type: application/json\r\n\
                     content-length: {}\r\n\
                     connection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { addr, requests }
    }

    fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    async fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().await.clone()
    }

    async fn refresh_calls(&self) -> usize {
        self.requests()
            .await
            .iter()
            .filter(|r| r.path == "/user/refresh")
            .count()
    }
}

/// Read one HTTP/1.1 request (headers plus content-length body) and
/// pull out the request line and bearer token.
async fn read_request(stream: &mut TcpStream) -> Option<Recorded> {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut tmp).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .skip(1)
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    // Drain the body so the client sees a clean connection
    let mut have = buf.len() - (header_end + 4);
    while have < content_length {
        let n = stream.read(&mut tmp).await.ok()?;
        if n == 0 {
            break;
        }
        have += n;
    }

    let mut request_line = head.lines().next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let bearer = head
        .lines()
        .skip(1)
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("authorization") {
                Some(value.trim().strip_prefix("Bearer ").unwrap_or("").to_string())
            } else {
                None
            }
        })
        .unwrap_or_default();

    Some(Recorded { method, path, bearer })
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn client_for(server: &StubServer) -> ApiClient {
    let config = Config {
        server_url: server.url(),
        request_timeout_secs: 5,
    };
    ApiClient::new(&config).expect("build client")
}

const USER_JSON: &str = r#"{"id":"7a9b2c6e-1f34-4d5a-8b7c-2e9d0f1a3b4c","name":"Test User","mail":"user@example.com"}"#;

#[tokio::test]
async fn login_stores_tokens_and_arms_refresh() {
    let server = StubServer::start(vec![
        (200, r#"{"token":"refresh-1"}"#),
        (200, r#"{"token":"access-1"}"#),
    ])
    .await;
    let client = client_for(&server);

    client.login("user@example.com", "hunter2").await.expect("login succeeds");
    assert!(client.is_authenticated().await);

    let requests = server.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/user/login");
    assert_eq!(requests[0].bearer, "");
    assert_eq!(requests[1].method, "GET");
    assert_eq!(requests[1].path, "/user/refresh");
    assert_eq!(requests[1].bearer, "refresh-1");
}

#[tokio::test]
async fn rejected_login_leaves_session_unauthenticated() {
    let server = StubServer::start(vec![
        (403, "Invalid credentials"),
        // An authenticated call afterwards gets a plain 401 back with
        // no refresh attempt, since the retry path was never armed.
        (401, ""),
    ])
    .await;
    let client = client_for(&server);

    let err = client.login("user@example.com", "wrong").await.expect_err("login fails");
    match err {
        ClientError::Auth { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!client.is_authenticated().await);

    let err = client.user_detail().await.expect_err("unauthenticated call fails");
    match err {
        ClientError::Api { status, .. } => assert_eq!(status, 401),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(server.refresh_calls().await, 0);
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried_once() {
    let server = StubServer::start(vec![
        (200, r#"{"token":"refresh-1"}"#),
        (200, r#"{"token":"access-1"}"#),
        (401, ""),
        (200, r#"{"token":"access-2"}"#),
        (200, USER_JSON),
    ])
    .await;
    let client = client_for(&server);

    client.login("user@example.com", "hunter2").await.expect("login succeeds");
    let user = client.user_detail().await.expect("detail succeeds after retry");
    assert_eq!(user.mail, "user@example.com");

    let requests = server.requests().await;
    assert_eq!(requests.len(), 5);
    // Exactly one refresh beyond the one login performed
    assert_eq!(server.refresh_calls().await, 2);
    // First attempt carried the stale token, the retry the fresh one
    assert_eq!(requests[2].path, "/user/detail");
    assert_eq!(requests[2].bearer, "access-1");
    assert_eq!(requests[4].path, "/user/detail");
    assert_eq!(requests[4].bearer, "access-2");
}

#[tokio::test]
async fn second_401_is_final() {
    let server = StubServer::start(vec![
        (200, r#"{"token":"refresh-1"}"#),
        (200, r#"{"token":"access-1"}"#),
        (401, ""),
        (200, r#"{"token":"access-2"}"#),
        (401, "still expired"),
    ])
    .await;
    let client = client_for(&server);

    client.login("user@example.com", "hunter2").await.expect("login succeeds");
    let err = client.user_detail().await.expect_err("second 401 surfaces");
    match err {
        ClientError::Api { status, .. } => assert_eq!(status, 401),
        other => panic!("unexpected error: {other:?}"),
    }

    // login, refresh, detail, refresh, detail - and nothing after
    assert_eq!(server.requests().await.len(), 5);
    assert_eq!(server.refresh_calls().await, 2);
}

#[tokio::test]
async fn failed_refresh_propagates_without_retrying() {
    let server = StubServer::start(vec![
        (200, r#"{"token":"refresh-1"}"#),
        (200, r#"{"token":"access-1"}"#),
        (401, ""),
        (401, "refresh token revoked"),
    ])
    .await;
    let client = client_for(&server);

    client.login("user@example.com", "hunter2").await.expect("login succeeds");
    let err = client.user_detail().await.expect_err("refresh failure surfaces");
    match err {
        ClientError::Auth { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "refresh token revoked");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // The original request is not resent after a failed refresh
    assert_eq!(server.requests().await.len(), 4);
}

#[tokio::test]
async fn refresh_without_login_is_rejected_by_server() {
    let server = StubServer::start(vec![(401, "")]).await;
    let client = client_for(&server);

    let err = client.refresh().await.expect_err("refresh without token fails");
    match err {
        ClientError::Auth { status, .. } => assert_eq!(status, 401),
        other => panic!("unexpected error: {other:?}"),
    }
    // The empty refresh token was attached as-is
    assert_eq!(server.requests().await[0].bearer, "");
}

#[tokio::test]
async fn changing_base_url_keeps_stale_tokens() {
    let server_a = StubServer::start(vec![
        (200, r#"{"token":"refresh-1"}"#),
        (200, r#"{"token":"access-1"}"#),
    ])
    .await;
    // The new server knows nothing about our tokens
    let server_b = StubServer::start(vec![(401, ""), (401, "unknown refresh token")]).await;

    let client = client_for(&server_a);
    client.login("user@example.com", "hunter2").await.expect("login succeeds");

    client.change_base_url(&server_b.url()).await;
    assert_eq!(client.server_url().await, server_b.url());

    let err = client.user_detail().await.expect_err("stale tokens rejected");
    match err {
        ClientError::Auth { status, .. } => assert_eq!(status, 401),
        other => panic!("unexpected error: {other:?}"),
    }

    // The stale access token went to the new server; nothing was
    // auto-cleared by the URL change itself
    assert_eq!(server_b.requests().await[0].bearer, "access-1");
    assert!(client.is_authenticated().await);
}

#[tokio::test]
async fn undecodable_body_with_multibyte_text_reports_invalid_response() {
    // A proxy answering 200 with an HTML page instead of JSON; the
    // snippet limit falls inside a two-byte character
    let body: &'static str = Box::leak(
        format!("<html>{}{}</html>", "x".repeat(193), "é".repeat(100)).into_boxed_str(),
    );
    let server = StubServer::start(vec![(200, body)]).await;
    let client = client_for(&server);

    let err = client.user_detail().await.expect_err("body is not JSON");
    match err {
        ClientError::InvalidResponse(msg) => assert!(msg.contains("<html>")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn timeout_surfaces_as_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        // Accept and then never answer
        if let Ok((stream, _)) = listener.accept().await {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            drop(stream);
        }
    });

    let config = Config {
        server_url: format!("http://{addr}"),
        request_timeout_secs: 1,
    };
    let client = ApiClient::new(&config).expect("build client");

    let err = client.user_detail().await.expect_err("request times out");
    match err {
        ClientError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
}
