//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use kakao_bridge::config::BridgeConfig;
use kakao_bridge::http::HttpServer;
use kakao_bridge::lifecycle::Shutdown;

/// Start a mock upstream that answers every request with a fixed status and
/// JSON body. Returns the bound address.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> SocketAddr {
    start_mock_upstream_with_delay(status, body, Duration::ZERO).await
}

/// Same as [`start_mock_upstream`], but sleeps before answering so callers
/// can exercise the answer budget.
pub async fn start_mock_upstream_with_delay(
    status: u16,
    body: &'static str,
    delay: Duration,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        read_request(&mut socket).await;
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Drain the request head and body so the client never sees a reset while
/// it is still writing.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        match tokio::time::timeout(Duration::from_millis(200), socket.read(&mut chunk)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => {
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }
            _ => break,
        }
    }
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(head_end) = find_subslice(buf, b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..head_end]);
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    buf.len() >= head_end + 4 + content_length
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Start the gateway against the given upstream and return its address.
pub async fn start_bridge(upstream_addr: SocketAddr, timeout_secs: f64) -> SocketAddr {
    let mut config = BridgeConfig::default();
    config.upstream.url = format!("http://{}/v2/chat", upstream_addr);
    config.upstream.api_key = "test-key".to_string();
    config.upstream.model_id = Some(1);
    config.upstream.timeout_secs = timeout_secs;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new(Duration::from_secs(1));
    tokio::spawn(async move {
        let _ = server.run(listener, shutdown).await;
    });

    addr
}
