// src/weather/mod.rs
pub mod document;
pub mod icons;
pub mod normalize;
pub mod regions;

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;

pub use document::ForecastDocument;
pub use normalize::{normalize, DailyForecastEntry, NormalizedForecast, PrecipitationSample};

use crate::error::WeatherError;
use crate::transport::Transport;

pub const DEFAULT_FORECAST_BASE_URL: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast";

/// Fetches and normalizes the forecast for a region.
pub struct WeatherService {
    transport: Arc<dyn Transport>,
    base_url: String,
    timeout: Duration,
    default_region: String,
}

impl WeatherService {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
            default_region: regions::DEFAULT_REGION.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = region.into();
        self
    }

    /// Forecast URL for `region`; unknown codes use the default region.
    pub fn forecast_url(&self, region: &str) -> String {
        let code = regions::resolve_region(region, &self.default_region);
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), code)
    }

    pub async fn fetch_document(&self, region: &str) -> Result<ForecastDocument, WeatherError> {
        let url = self.forecast_url(region);
        tracing::debug!(%url, "fetching forecast");
        let resp = self.transport.get(&url, self.timeout).await?;
        if !resp.is_success() {
            return Err(WeatherError::Status(resp.status));
        }
        Ok(ForecastDocument::from_json(&resp.body)?)
    }

    /// One refresh: fetch + normalize. Errors are counted and returned as values.
    pub async fn fetch(&self, region: &str) -> Result<NormalizedForecast, WeatherError> {
        let result = self
            .fetch_document(region)
            .await
            .and_then(|doc| normalize(&doc).map_err(WeatherError::from));
        if let Err(e) = &result {
            tracing::warn!(error = %e, region, "weather refresh failed");
            counter!("weather_fetch_errors_total").increment(1);
        }
        result
    }
}
