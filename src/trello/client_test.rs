//! Tests for the Trello HTTP client.
//!
//! Requests go to a one-shot HTTP responder on localhost so the real
//! reqwest path is exercised without touching the network.

use reqwest::Url;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::client::card_fields;
use super::*;

// Initialize crypto provider once for all tests
fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Answer exactly one request with `status` and `body`.
///
/// Resolves the receiver with the request line (`GET /1/... HTTP/1.1`).
async fn serve_once(status: &'static str, body: &str) -> (Url, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let request = String::from_utf8_lossy(&buf).to_string();
        let request_line = request.lines().next().unwrap_or_default().to_string();

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        let _ = tx.send(request_line);
    });

    let url = Url::parse(&format!("http://{addr}/1")).unwrap();
    (url, rx)
}

fn client(base: Url) -> TrelloClient {
    init_crypto();
    TrelloClient::new(base, "k".to_string(), "t".to_string()).unwrap()
}

#[test]
fn test_url_appends_segments_to_versioned_base() {
    let client = client(Url::parse(DEFAULT_API_URL).unwrap());
    let url = client.url(&["boards", "b1", "lists"]).unwrap();
    assert_eq!(url.as_str(), "https://api.trello.com/1/boards/b1/lists");
}

#[test]
fn test_base_url_is_kept_as_given() {
    let base = Url::parse("http://localhost:8080/1").unwrap();
    let client = client(base.clone());
    assert_eq!(client.base_url(), &base);
}

#[test]
fn test_url_tolerates_trailing_slash_in_base() {
    let client = client(Url::parse("https://api.trello.com/1/").unwrap());
    let url = client.url(&["cards", "c1"]).unwrap();
    assert_eq!(url.path(), "/1/cards/c1");
}

#[test]
fn test_url_escapes_ids() {
    let client = client(Url::parse(DEFAULT_API_URL).unwrap());
    let url = client.url(&["cards", "../members"]).unwrap();
    assert_eq!(url.path(), "/1/cards/..%2Fmembers");
}

#[test]
fn test_card_fields_only_sends_present_values() {
    let mut params = vec![("idList", "L1".to_string())];
    card_fields(
        &mut params,
        Some("Card"),
        None,
        Some("2025-12-31"),
        Some(&["l1".to_string(), "l2".to_string()]),
    );

    assert_eq!(
        params,
        vec![
            ("idList", "L1".to_string()),
            ("name", "Card".to_string()),
            ("due", "2025-12-31".to_string()),
            ("idLabels", "l1,l2".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_get_board_sends_credentials() {
    let (base, request) = serve_once("200 OK", r#"{"id":"b1","name":"Roadmap"}"#).await;
    let client = client(base);

    let board = client.get_board("b1").await.unwrap();
    assert_eq!(board.name, "Roadmap");

    let line = request.await.unwrap();
    assert!(line.starts_with("GET /1/boards/b1?"), "got {line}");
    assert!(line.contains("key=k"));
    assert!(line.contains("token=t"));
}

#[tokio::test]
async fn test_api_error_body_is_passed_through_verbatim() {
    let (base, _request) = serve_once("401 Unauthorized", "invalid token").await;
    let client = client(base);

    let err = client.list_boards().await.unwrap_err();
    match &err {
        TrelloError::Api { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "invalid token");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Trello API error (401): invalid token");
}

#[tokio::test]
async fn test_recent_activity_defaults_limit() {
    let (base, request) = serve_once("200 OK", "[]").await;
    let client = client(base);

    client.get_recent_activity("b1", None).await.unwrap();

    let line = request.await.unwrap();
    assert!(line.starts_with("GET /1/boards/b1/actions?"));
    assert!(line.contains("limit=10"), "got {line}");
}

#[tokio::test]
async fn test_comments_come_back_oldest_first() {
    let body = r#"[
        {"id":"c3","date":"2025-01-03","data":{"text":"third"},"memberCreator":{"fullName":"A"}},
        {"id":"c2","date":"2025-01-02","data":{"text":"second"},"memberCreator":{"fullName":"A"}},
        {"id":"c1","date":"2025-01-01","data":{"text":"first"},"memberCreator":{"fullName":"A"}}
    ]"#;
    let (base, request) = serve_once("200 OK", body).await;
    let client = client(base);

    let comments = client.get_card_comments("card1").await.unwrap();
    let ids: Vec<_> = comments.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2", "c3"]);

    let line = request.await.unwrap();
    assert!(line.contains("filter=commentCard"));
}

#[tokio::test]
async fn test_delete_comment_ignores_response_body() {
    let (base, request) = serve_once("200 OK", "").await;
    let client = client(base);

    client.delete_comment("card1", "cm1").await.unwrap();

    let line = request.await.unwrap();
    assert!(line.starts_with("DELETE /1/cards/card1/actions/cm1/comments?"));
}

#[tokio::test]
async fn test_undecodable_body_is_invalid_response() {
    let (base, _request) = serve_once("200 OK", "not json").await;
    let client = client(base);

    let err = client.get_card("c1").await.unwrap_err();
    assert!(matches!(err, TrelloError::InvalidResponse { .. }));
}
