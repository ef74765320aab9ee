//! Prometheus metrics collection and exposition endpoint.

use std::sync::{Arc, OnceLock};

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry,
    TextEncoder,
};
use salvo::{
    Depot, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

use scancart_app::domain::scanning::{ScanStatus, ScannerState};

use crate::state::State;

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    scan_commands_total: IntCounterVec,
    scan_session_running: IntGauge,
    scan_session_events: IntGaugeVec,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

/// Scanner lifecycle command issued over HTTP.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ScanCommand {
    Start,
    Stop,
}

impl ScanCommand {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        if let Some(metrics) = metrics() {
            metrics.requests_in_flight.inc();
            return Self { tracked: true };
        }

        Self { tracked: false }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a scanner command and how it ended (`success`, `info`, `error`).
pub(crate) fn observe_scan_command(command: ScanCommand, outcome: &str) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .scan_commands_total
        .with_label_values(&[command.as_str(), outcome])
        .inc();
}

fn record_scan_status(metrics: &Metrics, status: &ScanStatus) {
    metrics
        .scan_session_running
        .set(i64::from(status.state == ScannerState::Running));

    let stats = status.stats;

    for (event, value) in [
        ("frames", stats.frames),
        ("detections", stats.detections),
        ("accepted", stats.accepted),
        ("rate_limited", stats.rate_limited),
        ("debounced", stats.debounced),
        ("lookup_misses", stats.lookup_misses),
        ("decode_failures", stats.decode_failures),
    ] {
        metrics
            .scan_session_events
            .with_label_values(&[event])
            .set(i64::try_from(value).unwrap_or(i64::MAX));
    }
}

#[handler]
pub(crate) async fn metrics_handler(depot: &mut Depot, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    if let Ok(state) = depot.obtain::<Arc<State>>() {
        record_scan_status(metrics, &state.app.scanner.status().await);
    }

    let encoder = TextEncoder::new();
    let metric_families = metrics.registry.gather();

    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metric_families, &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    let content_type = match HeaderValue::from_str(encoder.format_type()) {
        Ok(value) => value,
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    };

    res.headers_mut().insert(CONTENT_TYPE, content_type);
    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static Metrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

fn register<M>(registry: &Registry, name: &str, metric: Result<M, prometheus::Error>) -> Option<M>
where
    M: prometheus::core::Collector + Clone + 'static,
{
    let metric = match metric {
        Ok(metric) => metric,
        Err(source) => {
            error!("failed to create {name} metric: {source}");
            return None;
        }
    };

    if let Err(source) = registry.register(Box::new(metric.clone())) {
        error!("failed to register {name} metric: {source}");
        return None;
    }

    Some(metric)
}

fn build_metrics() -> Option<Metrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        "requests_total",
        IntCounterVec::new(
            Opts::new(
                "scancart_http_requests_total",
                "Total HTTP requests partitioned by method, route, status class, and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "request_duration",
        HistogramVec::new(
            HistogramOpts::new(
                "scancart_http_request_duration_seconds",
                "HTTP request duration in seconds partitioned by method and route.",
            )
            .buckets(vec![
                0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "in-flight gauge",
        IntGauge::with_opts(Opts::new(
            "scancart_http_requests_in_flight",
            "Current number of in-flight HTTP requests.",
        )),
    )?;

    let scan_commands_total = register(
        &registry,
        "scan_commands_total",
        IntCounterVec::new(
            Opts::new(
                "scancart_scan_commands_total",
                "Scanner start/stop commands partitioned by command and outcome.",
            ),
            &["command", "outcome"],
        ),
    )?;

    let scan_session_running = register(
        &registry,
        "scan_session_running",
        IntGauge::with_opts(Opts::new(
            "scancart_scan_session_running",
            "Whether a scan session is currently reading frames.",
        )),
    )?;

    let scan_session_events = register(
        &registry,
        "scan_session_events",
        IntGaugeVec::new(
            Opts::new(
                "scancart_scan_session_events",
                "Counters of the current or most recent scan session.",
            ),
            &["event"],
        ),
    )?;

    Some(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        scan_commands_total,
        scan_session_running,
        scan_session_events,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
