//! End-to-end routing tests against an in-process HTTP responder.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use ember_chat::{
    send_message, BackendDescriptor, BackendFamily, ConversationTurn, EmberError,
    PersonalitySettings,
};

/// Serve a fixed HTTP response to every connection on an ephemeral port.
/// Returns the base URL to hit.
async fn spawn_responder(status_line: &'static str, body: &'static str) -> String {
    spawn_responder_with_delay(status_line, body, std::time::Duration::ZERO).await
}

/// Like `spawn_responder`, but holds every reply for `delay` first.
async fn spawn_responder_with_delay(
    status_line: &'static str,
    body: &'static str,
    delay: std::time::Duration,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };

            tokio::spawn(async move {
                // Drain the full request (headers plus declared body)
                // before answering, so the close never races the client.
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    match socket.read(&mut chunk).await {
                        Ok(0) => break,
                        Ok(n) => {
                            buf.extend_from_slice(&chunk[..n]);
                            if let Some(headers_end) =
                                buf.windows(4).position(|w| w == b"\r\n\r\n")
                            {
                                let headers = String::from_utf8_lossy(&buf[..headers_end]);
                                let content_length: usize = headers
                                    .lines()
                                    .find_map(|line| {
                                        let (name, value) = line.split_once(':')?;
                                        name.eq_ignore_ascii_case("content-length")
                                            .then(|| value.trim().parse().ok())?
                                    })
                                    .unwrap_or(0);
                                if buf.len() >= headers_end + 4 + content_length {
                                    break;
                                }
                            }
                        }
                        Err(_) => return,
                    }
                }

                tokio::time::sleep(delay).await;

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Bind and immediately drop a listener to get a port that refuses
/// connections.
async fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn local_descriptor(name: &str, endpoint: &str) -> BackendDescriptor {
    BackendDescriptor::new(name, BackendFamily::Local)
        .with_endpoint(endpoint)
        .with_model("test-model")
}

#[tokio::test]
async fn test_local_backend_success() {
    let endpoint = spawn_responder("200 OK", r#"{"message":{"content":"hello from mock"}}"#).await;
    let descriptors = vec![local_descriptor("mock", &endpoint).active(true)];

    let result = send_message(
        &descriptors,
        &PersonalitySettings::default(),
        &[ConversationTurn::user("hi")],
    )
    .await
    .unwrap();

    assert_eq!(result.content, "hello from mock");
    assert_eq!(result.model, "test-model");
    assert_eq!(result.family, BackendFamily::Local);
}

#[tokio::test]
async fn test_failover_to_inactive_backend() {
    let dead = dead_endpoint().await;
    let alive = spawn_responder("200 OK", r#"{"response":"fallback answer"}"#).await;

    // The active backend refuses connections; the inactive one answers.
    let descriptors = vec![
        local_descriptor("fallback", &alive),
        local_descriptor("primary", &dead).active(true),
    ];

    let result = send_message(
        &descriptors,
        &PersonalitySettings::default(),
        &[ConversationTurn::user("hi")],
    )
    .await
    .unwrap();

    assert_eq!(result.content, "fallback answer");
}

#[tokio::test]
async fn test_http_error_is_recorded_per_backend() {
    let erroring = spawn_responder("500 Internal Server Error", "boom").await;
    let descriptors = vec![local_descriptor("broken", &erroring).active(true)];

    let err = send_message(
        &descriptors,
        &PersonalitySettings::default(),
        &[ConversationTurn::user("hi")],
    )
    .await
    .unwrap_err();

    let EmberError::AllBackendsFailed(details) = err else {
        panic!("expected AllBackendsFailed");
    };
    assert!(details.contains("broken:"));
    assert!(details.contains("500"));
}

#[tokio::test]
async fn test_empty_body_is_a_backend_failure() {
    let empty = spawn_responder("200 OK", "{}").await;
    let descriptors = vec![local_descriptor("hollow", &empty).active(true)];

    let err = send_message(
        &descriptors,
        &PersonalitySettings::default(),
        &[ConversationTurn::user("hi")],
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("hollow"));
    assert!(err.to_string().contains("No content"));
}

#[tokio::test]
async fn test_failed_attempts_count_toward_latency() {
    // The first backend stalls for 300ms before returning an empty body,
    // which the normalizer rejects; the second answers immediately. The
    // winning result's latency must still carry the failed attempt.
    let delay = std::time::Duration::from_millis(300);
    let slow = spawn_responder_with_delay("200 OK", "{}", delay).await;
    let alive = spawn_responder("200 OK", r#"{"response":"ok"}"#).await;

    let descriptors = vec![
        local_descriptor("first", &slow).active(true),
        local_descriptor("second", &alive).active(true),
    ];

    let started = std::time::Instant::now();
    let result = send_message(
        &descriptors,
        &PersonalitySettings::default(),
        &[ConversationTurn::user("hi")],
    )
    .await
    .unwrap();
    let wall = started.elapsed().as_millis() as u64;

    assert_eq!(result.content, "ok");
    assert!(
        result.latency_ms >= delay.as_millis() as u64,
        "latency {}ms must include the 300ms failed attempt",
        result.latency_ms
    );
    assert!(result.latency_ms <= wall + 1);
}
