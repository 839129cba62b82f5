//! Span helpers for request telemetry.
//!
//! With the `telemetry` feature every request runs inside a
//! `tokes_payments.request` span carrying the verb and path, and its outcome is
//! recorded on that span. Without the feature these are no-ops.

use std::fmt::Display;

#[cfg(feature = "telemetry")]
use tracing::{Instrument, Span};

/// Records the outcome of a request on the current span, including status and errors.
#[cfg(feature = "telemetry")]
pub(crate) fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to payments API failed");
        }
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
pub(crate) fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}

/// Runs `fut` inside a request span for `method` and `path`.
#[cfg(feature = "telemetry")]
pub(crate) fn with_request_span<F: Future>(
    method: &http::Method,
    path: &str,
    fut: F,
) -> impl Future<Output = F::Output> + use<F> {
    let span = tracing::info_span!(
        "tokes_payments.request",
        http.method = %method,
        url.path = %path,
        otel.status_code = tracing::field::Empty,
        error.message = tracing::field::Empty,
    );
    fut.instrument(span)
}

#[cfg(not(feature = "telemetry"))]
pub(crate) fn with_request_span<F: Future>(
    _method: &http::Method,
    _path: &str,
    fut: F,
) -> impl Future<Output = F::Output> + use<F> {
    fut
}
