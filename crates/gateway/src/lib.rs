#![forbid(unsafe_code)]

//! # Chronicle Gateway
//!
//! The HTTP surface of the history API. Handlers validate request
//! parameters once at the boundary, hand resolution to
//! `chronicle-history`, and record every request through the timed-query
//! instrumentation. Resolution failures surface as a generic server error;
//! details go to the log, not the client.

use axum::{
    error_handling::HandleErrorLayer,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chronicle_history::resolve_schedule;
use chronicle_store::client::SearchStore;
use chronicle_telemetry::{install_metrics, QueryTimer};
use chronicle_types::config::GatewayConfig;
use chronicle_types::error::{ErrorCode, HistoryError};
use chronicle_types::schedule::{ScheduleFilters, ScheduleMode, ScheduleResponse, SortOrder};
use prometheus::Encoder;
use serde::Deserialize;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::sync::watch;
use tower::{
    limit::ConcurrencyLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer, BoxError,
    ServiceBuilder,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

const SCHEDULE_ROUTE: &str = "/v2/history/get_schedule";

// --- Error Handling ---

/// A gateway-level error mapped onto an HTTP response.
#[derive(Debug)]
pub enum AppError {
    /// The request parameters were invalid.
    BadRequest(String),
    /// Schedule resolution failed. Logged with its stable code; the client
    /// sees a generic server error.
    Internal(HistoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg, code) = match self {
            AppError::BadRequest(s) => (StatusCode::BAD_REQUEST, s, "INVALID_REQUEST"),
            AppError::Internal(e) => {
                tracing::error!(
                    target: "gateway",
                    code = e.code(),
                    error = %e,
                    "schedule resolution failed"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };
        (
            status,
            Json(serde_json::json!({ "error": { "code": code, "message": msg } })),
        )
            .into_response()
    }
}

// --- State & Request Types ---

/// Shared state for gateway handlers.
pub struct GatewayState {
    /// The document-store search client.
    pub store: Arc<dyn SearchStore>,
    /// Chain name namespacing the store's indices.
    pub chain: String,
}

/// Raw query-string parameters of the schedule route. All optional; blank
/// values are treated as absent.
#[derive(Debug, Default, Deserialize)]
struct ScheduleParams {
    mode: Option<String>,
    version: Option<String>,
    sort: Option<String>,
    producer: Option<String>,
    key: Option<String>,
}

impl ScheduleParams {
    fn mode(&self) -> ScheduleMode {
        ScheduleMode::from_param(self.mode.as_deref())
    }

    fn filters(self) -> Result<ScheduleFilters, AppError> {
        let version = match self.version.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
                AppError::BadRequest(format!("invalid version parameter: {raw}"))
            })?),
            None => None,
        };
        Ok(ScheduleFilters {
            version,
            producer: self.producer.filter(|s| !s.is_empty()),
            key: self.key.filter(|s| !s.is_empty()),
            sort: SortOrder::from_param(self.sort.as_deref()),
        })
    }
}

// --- Handlers ---

async fn get_schedule_handler(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<ScheduleParams>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let mode = params.mode();
    let filters = params.filters()?;

    let timer = QueryTimer::start(&state.chain, SCHEDULE_ROUTE);
    match resolve_schedule(state.store.as_ref(), &state.chain, mode, &filters).await {
        Ok(response) => {
            timer.finish("ok");
            Ok(Json(response))
        }
        Err(err) => {
            timer.finish("error");
            Err(AppError::Internal(err))
        }
    }
}

async fn metrics_handler() -> ([(axum::http::HeaderName, String); 1], axum::body::Bytes) {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        tracing::error!(target: "gateway", error = %e, "failed to encode prometheus metrics");
    }
    (
        [(
            axum::http::header::CONTENT_TYPE,
            encoder.format_type().to_string(),
        )],
        buf.into(),
    )
}

async fn healthz_handler() -> &'static str {
    "OK"
}

// Used by HandleErrorLayer to turn middleware failures into structured
// responses.
async fn map_middleware_error(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(serde_json::json!({
                "error": { "code": "TIMEOUT", "message": "request timed out" }
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "error": { "code": "OVERLOADED", "message": err.to_string() }
            })),
        )
    }
}

// --- Server ---

/// Builds the gateway router over the given state.
pub fn router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route(SCHEDULE_ROUTE, get(get_schedule_handler))
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(healthz_handler))
        .with_state(state)
}

/// Runs the gateway until `shutdown_rx` observes a change.
pub async fn run_server(
    config: GatewayConfig,
    chain: String,
    store: Arc<dyn SearchStore>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    install_metrics();

    let state = Arc::new(GatewayState { store, chain });

    // `HandleErrorLayer` must wrap the fallible layers to make the service
    // infallible; the panic and trace layers sit outside it.
    let app = router(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(map_middleware_error))
                .layer(LoadShedLayer::new())
                .layer(ConcurrencyLimitLayer::new(config.concurrency_limit))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeout_secs))),
        )
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(target: "gateway", %addr, "history gateway listening");

    let server = axum::serve(listener, app.into_make_service()).with_graceful_shutdown(
        async move {
            shutdown_rx.changed().await.ok();
            tracing::info!(target: "gateway", "shutting down gracefully");
        },
    );

    if let Err(e) = server.await {
        tracing::error!(target: "gateway", error = %e, "server error");
    }

    Ok(())
}
