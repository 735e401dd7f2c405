//! Info Display Panel: binary entrypoint
//! Loads config, starts the refresh loops and serves the panel API over Axum.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;

use info_display::{
    api::{self, AppState},
    config::AppConfig,
    metrics::Metrics,
    news::NewsService,
    panel,
    scheduler::{self, Refresher},
    settings::{MemorySettings, SettingsStore},
    telemetry,
    transport::{HttpTransport, Transport},
    weather::WeatherService,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let cfg = AppConfig::load_default()?;
    tracing::info!(
        bind = %cfg.bind_addr,
        weather_secs = cfg.weather_refresh_secs,
        news_secs = cfg.news_refresh_secs,
        "panel config loaded"
    );

    let metrics = Metrics::init()?;

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&cfg.user_agent)?);
    let weather = WeatherService::new(transport.clone(), cfg.weather_base_url.clone())
        .with_timeout(cfg.fetch_timeout())
        .with_default_region(cfg.default_region.clone());
    let news = NewsService::new(transport)
        .with_timeout(cfg.fetch_timeout())
        .with_display_limit(cfg.news_display_limit);

    let settings: Arc<dyn SettingsStore> = Arc::new(MemorySettings::new(
        cfg.default_region.clone(),
        cfg.default_category.clone(),
    ));
    let shared = panel::shared();
    let (refresh_tx, refresh_rx) = watch::channel(0u64);

    let refresher = Arc::new(Refresher::new(
        weather,
        news,
        settings.clone(),
        shared.clone(),
    ));
    let _loops = scheduler::spawn_all(refresher, &cfg, refresh_rx);

    let app = api::router(AppState::new(shared, settings, refresh_tx)).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("binding {}", cfg.bind_addr))?;
    tracing::info!(addr = %cfg.bind_addr, "panel API listening");
    axum::serve(listener, app).await.context("serving panel API")?;
    Ok(())
}
