//! Request metrics for the history API.
//!
//! Registration is lazy and idempotent so test processes can install the
//! collectors more than once without tripping the duplicate-name check in
//! the default registry.

use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram_vec, register_int_counter_vec, HistogramVec,
    IntCounterVec,
};
use std::time::Instant;

static REQ_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static REQ_LATENCY: OnceCell<HistogramVec> = OnceCell::new();

/// Registers the history-API collectors with the default registry.
/// Must run before the first [`QueryTimer`] finishes.
pub fn install_metrics() {
    REQ_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            "chronicle_api_requests_total",
            "Total history-API requests",
            &["chain", "route", "result"]
        )
        .expect("register_int_counter_vec")
    });
    REQ_LATENCY.get_or_init(|| {
        register_histogram_vec!(
            "chronicle_api_request_duration_seconds",
            "Latency of history-API requests (seconds)",
            &["chain", "route", "result"],
            exponential_buckets(0.001, 2.0, 15).expect("buckets")
        )
        .expect("register_histogram_vec")
    });
}

fn req_total() -> &'static IntCounterVec {
    REQ_TOTAL
        .get()
        .expect("install_metrics() must be called before serving")
}

fn req_latency() -> &'static HistogramVec {
    REQ_LATENCY
        .get()
        .expect("install_metrics() must be called before serving")
}

/// Times one request and records its outcome.
///
/// The wrapper is transparent to the wrapped operation: it only observes
/// duration and result, never alters the return value.
pub struct QueryTimer {
    chain: String,
    route: &'static str,
    start: Instant,
}

impl QueryTimer {
    /// Starts timing a request on `route`.
    pub fn start(chain: impl Into<String>, route: &'static str) -> Self {
        Self {
            chain: chain.into(),
            route,
            start: Instant::now(),
        }
    }

    /// Records the outcome (`"ok"` or `"error"`) and the elapsed duration.
    pub fn finish(self, result: &'static str) {
        let labels = [self.chain.as_str(), self.route, result];
        req_total().with_label_values(&labels).inc();
        req_latency()
            .with_label_values(&labels)
            .observe(self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_is_idempotent_and_timers_record() {
        install_metrics();
        install_metrics();

        let before = req_total().with_label_values(&["ala", "/test", "ok"]).get();
        QueryTimer::start("ala", "/test").finish("ok");
        let after = req_total().with_label_values(&["ala", "/test", "ok"]).get();
        assert_eq!(after, before + 1);
    }
}
