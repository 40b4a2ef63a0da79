//! Per-request tracing span.

use std::future::Future;
use std::time::Instant;

use http::Method;
use tracing::{Instrument, debug, info_span};

use crate::response::Response;

/// Runs `fut` inside a `request` span and logs the outcome when it resolves.
pub(crate) async fn trace<F>(method: &Method, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", %method, path);
    let started = Instant::now();
    let response = fut.instrument(span.clone()).await;

    span.in_scope(|| {
        debug!(
            status = response.status_code().as_u16(),
            latency_us = started.elapsed().as_micros() as u64,
            "request completed"
        );
    });
    response
}
