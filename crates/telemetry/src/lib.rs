#![forbid(unsafe_code)]

//! # Chronicle Telemetry
//!
//! Observability infrastructure for the history service: structured logging
//! initialization and the Prometheus request metrics recorded by the
//! gateway's timed-query wrapper.

/// The initialization routine for global structured logging.
pub mod init;
/// Prometheus registration and the per-request timer.
pub mod metrics;

pub use metrics::{install_metrics, QueryTimer};
