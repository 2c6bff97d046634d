// tests/http_tests.rs

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use clipscope_ai::{GeminiProvider, ModelProvider, OpenAIProvider, ProviderConfig};
use clipscope_common::AnalysisError;

// ---------- One-shot HTTP server ----------

/// Read one request, headers plus `Content-Length` bytes of body.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                return;
            }
        }
    }
}

/// Answer a single request with the given status line and body. Returns an API base.
async fn serve_once(status: &'static str, content_type: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}/v1")
}

fn openai_at(api_base: String) -> OpenAIProvider {
    let mut config = ProviderConfig::openai("sk-test");
    config.api_base = Some(api_base);
    OpenAIProvider::new(config)
}

// ---------- Tests ----------

#[tokio::test]
async fn test_error_message_from_service_is_kept() {
    let base = serve_once(
        "500 Internal Server Error",
        "application/json",
        r#"{"error":{"message":"quota","code":429}}"#,
    )
    .await;

    let mut config = ProviderConfig::gemini("key");
    config.api_base = Some(base);
    let provider = GeminiProvider::new(config);

    match provider.generate_json("system", "prompt").await {
        Err(AnalysisError::Service(msg)) => assert_eq!(msg, "quota"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_page_reports_status() {
    let base = serve_once("502 Bad Gateway", "text/html", "<html><body>Bad Gateway</body></html>").await;

    match openai_at(base).generate_json("system", "prompt").await {
        Err(AnalysisError::Service(msg)) => {
            assert!(msg.starts_with("analysis service returned HTTP 502"), "got {msg}");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_success_with_non_json_body_is_malformed() {
    let base = serve_once("200 OK", "text/plain", "definitely not json").await;

    let result = openai_at(base).generate_json("system", "prompt").await;
    assert!(matches!(result, Err(AnalysisError::Malformed(_))), "got {result:?}");
}

#[tokio::test]
async fn test_success_body_reaches_extraction() {
    let base = serve_once(
        "200 OK",
        "application/json",
        r#"{"choices":[{"message":{"role":"assistant","content":"{\"title\":\"t\"}"}}]}"#,
    )
    .await;

    let text = openai_at(base).generate_json("system", "prompt").await.unwrap();
    assert_eq!(text, r#"{"title":"t"}"#);
}

#[tokio::test]
async fn test_refused_connection_is_an_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = openai_at(format!("http://{addr}/v1")).generate_json("system", "prompt").await;
    assert!(matches!(result, Err(AnalysisError::Http(_))), "got {result:?}");
}
