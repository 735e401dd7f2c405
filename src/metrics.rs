use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder and register every panel series.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        describe_all();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// One-time metrics registration (so series show up on /metrics).
pub fn describe_all() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "news_strategy_attempts_total",
            "Feed retrieval attempts, labeled by strategy."
        );
        describe_counter!(
            "news_strategy_failures_total",
            "Failed feed retrieval attempts, labeled by strategy."
        );
        describe_counter!(
            "news_fetch_exhausted_total",
            "News refreshes where every strategy failed."
        );
        describe_counter!("weather_fetch_errors_total", "Failed forecast refreshes.");
        describe_histogram!("feed_parse_ms", "Feed payload parse time in milliseconds.");
        describe_gauge!(
            "panel_last_refresh_ts",
            "Unix ts of the last refresh, labeled by section."
        );
    });
}
