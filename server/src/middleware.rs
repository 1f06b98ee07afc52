use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Instrument, info, info_span};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Logs method, path, peer, status and duration of every request.
///
/// The handler runs inside a `request{id=N}` span, so everything discovery
/// logs for one request can be told apart from concurrent ones. The peer is
/// only known when the router is served with connect info; otherwise it is
/// logged as `-`.
pub async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let span = info_span!("request", id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed));
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(request).instrument(span.clone()).await;

    span.in_scope(|| {
        info!(
            "Method={method} URL={path} From={remote} Status={} Duration={:?}",
            response.status().as_u16(),
            start.elapsed()
        )
    });
    response
}
