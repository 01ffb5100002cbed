//! Embedded mock servers for the dispatch tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use api_tester::RunConfig;
use axum::body::{Body, Bytes};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use futures::stream;
use tokio::net::TcpListener;

/// Start an axum server on an ephemeral port.
///
/// Routes:
/// - `/ok` -> 200 `ok` immediately
/// - `/slow` -> 200 `slow` after 10 ms
/// - `/fail` -> 500
/// - `/missing` -> 404
/// - `/chunked` -> 200, five 1 KiB chunks 100 ms apart
/// - `/stall` -> 200, 16 bytes then nothing for 5 s
pub async fn start_mock_server() -> anyhow::Result<SocketAddr> {
    let app = Router::new()
        .route("/ok", get(|| async { "ok" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                "slow"
            }),
        )
        .route("/fail", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "nope") }))
        .route("/chunked", get(|| async { chunked_body() }))
        .route("/stall", get(|| async { stalled_body() }));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok(addr)
}

fn chunked_body() -> Body {
    let chunks = stream::unfold(0u32, |sent| async move {
        if sent == 5 {
            return None;
        }
        if sent > 0 {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        Some((Ok::<_, std::io::Error>(Bytes::from(vec![b'x'; 1024])), sent + 1))
    });
    Body::from_stream(chunks)
}

fn stalled_body() -> Body {
    let chunks = stream::unfold(0u32, |sent| async move {
        match sent {
            0 => Some((Ok::<_, std::io::Error>(Bytes::from_static(b"0123456789abcdef")), 1)),
            1 => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Some((Ok(Bytes::from_static(b"late")), 2))
            }
            _ => None,
        }
    });
    Body::from_stream(chunks)
}

/// Accepts connections and closes them straight away, counting each accept.
pub async fn start_dropping_server() -> anyhow::Result<(SocketAddr, Arc<AtomicUsize>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            drop(socket);
        }
    });
    Ok((addr, accepted))
}

/// Accepts connections and never answers.
pub async fn start_silent_server() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    Ok(addr)
}

/// An address nothing listens on.
pub async fn closed_port() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

pub fn quiet_config(url: String, total_calls: u64, worker_count: usize) -> RunConfig {
    let mut config = RunConfig::new(url.parse().expect("valid test url"));
    config.total_calls = total_calls;
    config.worker_count = worker_count;
    config.request_timeout = Duration::from_secs(5);
    config.connect_timeout = Duration::from_secs(5);
    config.echo = false;
    config
}
