use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Local;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;

use crate::panel::{self, CalendarView, NewsView, PanelSnapshot, SharedPanel, WeatherView};
use crate::settings::{SettingsSnapshot, SettingsStore, SettingsUpdate};

#[derive(Clone)]
pub struct AppState {
    pub panel: SharedPanel,
    pub settings: Arc<dyn SettingsStore>,
    /// Bumped on every settings change; the weather and news loops refresh on it.
    pub refresh: Arc<watch::Sender<u64>>,
}

impl AppState {
    pub fn new(
        panel: SharedPanel,
        settings: Arc<dyn SettingsStore>,
        refresh: watch::Sender<u64>,
    ) -> Self {
        Self {
            panel,
            settings,
            refresh: Arc::new(refresh),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/panel", get(get_panel))
        .route("/api/weather", get(get_weather))
        .route("/api/news", get(get_news))
        .route("/api/calendar", get(get_calendar))
        .route("/api/settings", get(get_settings).put(put_settings))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn get_panel(State(state): State<AppState>) -> Json<PanelSnapshot> {
    let now = Local::now();
    Json(panel::read(&state.panel).snapshot(&now))
}

async fn get_weather(State(state): State<AppState>) -> Json<WeatherView> {
    Json(panel::read(&state.panel).weather.clone())
}

async fn get_news(State(state): State<AppState>) -> Json<NewsView> {
    let now = Local::now();
    Json(panel::read(&state.panel).news_view(&now))
}

async fn get_calendar(State(state): State<AppState>) -> Json<CalendarView> {
    Json(panel::read(&state.panel).calendar_view())
}

async fn get_settings(State(state): State<AppState>) -> Json<SettingsSnapshot> {
    Json(SettingsSnapshot::read(state.settings.as_ref()))
}

async fn put_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Json<SettingsSnapshot> {
    if update.apply(state.settings.as_ref()) {
        state.refresh.send_modify(|v| *v = v.wrapping_add(1));
        tracing::info!("settings changed, refresh requested");
    }
    Json(SettingsSnapshot::read(state.settings.as_ref()))
}
