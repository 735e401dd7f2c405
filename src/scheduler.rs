// src/scheduler.rs
//! Periodic refresh loops for weather, news and the calendar.
//!
//! Every loop refreshes once at startup. Weather and news also refresh whenever the
//! settings trigger fires; the calendar re-renders every tick and once right after
//! local midnight.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, Utc};
use metrics::gauge;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};

use crate::config::AppConfig;
use crate::datemath;
use crate::news::NewsService;
use crate::panel::{self, SharedPanel};
use crate::settings::{SettingKey, SettingsStore};
use crate::weather::WeatherService;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Runs single refreshes and writes their outcome into the shared panel.
pub struct Refresher {
    weather: WeatherService,
    news: NewsService,
    settings: Arc<dyn SettingsStore>,
    panel: SharedPanel,
}

impl Refresher {
    pub fn new(
        weather: WeatherService,
        news: NewsService,
        settings: Arc<dyn SettingsStore>,
        panel: SharedPanel,
    ) -> Self {
        Self {
            weather,
            news,
            settings,
            panel,
        }
    }

    pub async fn refresh_weather(&self) {
        let region = self.settings.get(SettingKey::WeatherRegion);
        let result = self.weather.fetch(&region).await;
        let now = Utc::now();
        if result.is_ok() {
            tracing::info!(region = %region, "weather refreshed");
        }
        panel::write(&self.panel).apply_weather(&region, result, now);
        gauge!("panel_last_refresh_ts", "section" => "weather").set(now.timestamp() as f64);
    }

    pub async fn refresh_news(&self) {
        let category = self.settings.get(SettingKey::NewsCategory);
        let result = self.news.fetch(&category).await;
        let now = Utc::now();
        match &result {
            Ok(r) => tracing::info!(
                category = %category,
                strategy = %r.strategy,
                items = r.items.len(),
                "news refreshed"
            ),
            Err(e) => tracing::warn!(
                category = %category,
                tried = ?e.strategy_names(),
                "news refresh exhausted every strategy"
            ),
        }
        panel::write(&self.panel).apply_news(&category, result, now);
        gauge!("panel_last_refresh_ts", "section" => "news").set(now.timestamp() as f64);
    }

    pub fn refresh_calendar(&self) {
        let now = Local::now();
        panel::write(&self.panel).apply_calendar(&now);
        gauge!("panel_last_refresh_ts", "section" => "calendar").set(now.timestamp() as f64);
    }
}

/// Wait for the next tick, or for a settings change if one arrives first.
///
/// A closed trigger channel degrades to plain ticking.
async fn next_trigger(ticker: &mut Interval, trigger: &mut watch::Receiver<u64>, open: &mut bool) {
    if *open {
        tokio::select! {
            _ = ticker.tick() => return,
            changed = trigger.changed() => match changed {
                Ok(()) => {
                    // Restart the period so a manual refresh isn't followed by an immediate tick.
                    ticker.reset();
                    return;
                }
                Err(_) => *open = false,
            }
        }
    }
    ticker.tick().await;
}

fn ticker(period: Duration) -> Interval {
    let mut t = interval(period);
    t.set_missed_tick_behavior(MissedTickBehavior::Delay);
    t
}

pub fn spawn_weather_loop(
    refresher: Arc<Refresher>,
    period: Duration,
    mut trigger: watch::Receiver<u64>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut t = ticker(period);
        let mut open = true;
        loop {
            next_trigger(&mut t, &mut trigger, &mut open).await;
            refresher.refresh_weather().await;
        }
    })
}

pub fn spawn_news_loop(
    refresher: Arc<Refresher>,
    period: Duration,
    mut trigger: watch::Receiver<u64>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut t = ticker(period);
        let mut open = true;
        loop {
            next_trigger(&mut t, &mut trigger, &mut open).await;
            refresher.refresh_news().await;
        }
    })
}

pub fn spawn_calendar_loop(refresher: Arc<Refresher>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut t = ticker(period);
        loop {
            t.tick().await;
            refresher.refresh_calendar();
        }
    })
}

/// Re-render right after local midnight, then every 24h.
pub fn spawn_midnight_rollover(refresher: Arc<Refresher>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let delay = datemath::until_next_midnight(&Local::now());
        tracing::debug!(secs = delay.as_secs(), "calendar rollover scheduled");
        tokio::time::sleep(delay).await;
        refresher.refresh_calendar();

        let mut daily = interval_at(Instant::now() + DAY, DAY);
        loop {
            daily.tick().await;
            refresher.refresh_calendar();
        }
    })
}

/// Start every refresh loop with the intervals from `cfg`.
pub fn spawn_all(
    refresher: Arc<Refresher>,
    cfg: &AppConfig,
    trigger: watch::Receiver<u64>,
) -> Vec<JoinHandle<()>> {
    vec![
        spawn_weather_loop(refresher.clone(), cfg.weather_refresh(), trigger.clone()),
        spawn_news_loop(refresher.clone(), cfg.news_refresh(), trigger),
        spawn_calendar_loop(refresher.clone(), cfg.calendar_tick()),
        spawn_midnight_rollover(refresher),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::panel::{NewsState, WeatherView};
    use crate::settings::MemorySettings;
    use crate::transport::{Transport, TransportResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const RSS: &str = "<rss><channel><item><title>one</title></item></channel></rss>";

    /// Serves RSS for feeds and a 503 for everything else; counts requests.
    #[derive(Default)]
    struct Stub {
        hits: AtomicUsize,
    }

    #[async_trait]
    impl Transport for Stub {
        async fn get(&self, url: &str, _t: Duration) -> Result<TransportResponse, TransportError> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            let (status, body) = if url.ends_with(".xml") {
                (200, RSS)
            } else {
                (503, "")
            };
            Ok(TransportResponse {
                status,
                body: body.to_string(),
            })
        }
    }

    fn refresher(stub: Arc<Stub>) -> (Arc<Refresher>, SharedPanel) {
        let shared = panel::shared();
        let settings = Arc::new(MemorySettings::new("130000", "main"));
        let r = Refresher::new(
            WeatherService::new(stub.clone(), "https://example.test"),
            NewsService::new(stub),
            settings,
            shared.clone(),
        );
        (Arc::new(r), shared)
    }

    #[tokio::test]
    async fn single_refreshes_land_in_panel() {
        let (r, shared) = refresher(Arc::new(Stub::default()));
        r.refresh_weather().await;
        r.refresh_news().await;
        r.refresh_calendar();

        let st = panel::read(&shared);
        assert!(matches!(st.weather, WeatherView::Error { .. }));
        assert!(matches!(&st.news, NewsState::Ready { strategy, .. } if strategy == "direct"));
        assert!(st.calendar.is_some());
        assert!(st.today.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_refreshes_before_the_next_tick() {
        let stub = Arc::new(Stub::default());
        let (r, _shared) = refresher(stub.clone());
        let (tx, rx) = watch::channel(0u64);

        let handle = spawn_news_loop(r, Duration::from_secs(300), rx);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(stub.hits.load(Ordering::SeqCst), 1, "startup refresh");

        tx.send_modify(|v| *v += 1);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(stub.hits.load(Ordering::SeqCst), 2, "triggered refresh");

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(stub.hits.load(Ordering::SeqCst), 3, "periodic refresh");
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn closed_trigger_falls_back_to_ticking() {
        let stub = Arc::new(Stub::default());
        let (r, _shared) = refresher(stub.clone());
        let (tx, rx) = watch::channel(0u64);
        drop(tx);

        let handle = spawn_news_loop(r, Duration::from_secs(60), rx);
        tokio::time::sleep(Duration::from_secs(150)).await;
        assert_eq!(stub.hits.load(Ordering::SeqCst), 3);
        handle.abort();
    }
}
