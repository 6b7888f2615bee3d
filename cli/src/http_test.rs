use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::*;

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body.len() >= length
}

/// Accept one connection, answer with `status` and `body`, return the raw request.
async fn serve_once(status: u16, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut chunk = [0_u8; 1024];
        while !request_complete(&raw) {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        String::from_utf8_lossy(&raw).into_owned()
    });
    (base, handle)
}

#[test]
fn methods_map_one_to_one() {
    assert_eq!(reqwest_method(Method::Get), reqwest::Method::GET);
    assert_eq!(reqwest_method(Method::Put), reqwest::Method::PUT);
    assert_eq!(reqwest_method(Method::Patch), reqwest::Method::PATCH);
    assert_eq!(reqwest_method(Method::Delete), reqwest::Method::DELETE);
}

#[tokio::test]
async fn sends_bearer_and_json_body() {
    let (base, server) = serve_once(200, r#"{"ok":true}"#).await;
    let transport = ReqwestTransport::new(base);
    let request = ApiRequest::new(Method::Post, "/messages")
        .json(&serde_json::json!({ "content": "hi" }))
        .unwrap()
        .bearer(Some("tok-1".to_owned()));

    let response = transport.send(request).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"ok":true}"#);

    let raw = server.await.unwrap().to_ascii_lowercase();
    assert!(raw.starts_with("post /api/messages http/1.1"));
    assert!(raw.contains("authorization: bearer tok-1"));
    assert!(raw.contains("content-type: application/json"));
    assert!(raw.ends_with(r#"{"content":"hi"}"#));
}

#[tokio::test]
async fn anonymous_request_has_no_authorization() {
    let (base, server) = serve_once(200, "[]").await;
    let transport = ReqwestTransport::new(base);

    transport.send(ApiRequest::new(Method::Get, "/categories")).await.unwrap();

    let raw = server.await.unwrap().to_ascii_lowercase();
    assert!(raw.starts_with("get /api/categories http/1.1"));
    assert!(!raw.contains("authorization:"));
}

#[tokio::test]
async fn error_status_is_a_response_not_an_error() {
    let (base, server) = serve_once(401, r#"{"message":"Invalid credentials"}"#).await;
    let transport = ReqwestTransport::new(base);

    let response = transport.send(ApiRequest::new(Method::Post, "/auth/login")).await.unwrap();
    server.await.unwrap();

    assert_eq!(response.status, 401);
    let err = response.error_for_status().unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    drop(listener);

    let err = ReqwestTransport::new(base).send(ApiRequest::new(Method::Get, "/categories")).await.unwrap_err();
    assert!(matches!(err, AuthError::Transport(_)));
}
