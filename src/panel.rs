//! # Panel State
//! Latest rendered content of every panel section.
//!
//! Each refresh replaces its section wholesale. A failed weather refresh becomes an
//! error state; an exhausted news refresh keeps the previously shown headlines for
//! the same category and records why every strategy failed.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::calendar::{self, CalendarGrid, TodaySummary};
use crate::datemath;
use crate::error::{FetchExhausted, WeatherError};
use crate::news::{categories, FeedItem, Retrieved};
use crate::weather::{regions, NormalizedForecast};

pub type SharedPanel = Arc<RwLock<PanelState>>;

pub fn shared() -> SharedPanel {
    Arc::new(RwLock::new(PanelState::default()))
}

pub fn read(panel: &SharedPanel) -> RwLockReadGuard<'_, PanelState> {
    panel.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write(panel: &SharedPanel) -> RwLockWriteGuard<'_, PanelState> {
    panel.write().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeatherView {
    Pending,
    Ready {
        region: String,
        region_name: &'static str,
        forecast: NormalizedForecast,
        updated_at: DateTime<Utc>,
    },
    Error {
        region: String,
        region_name: &'static str,
        message: String,
        failed_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsState {
    Pending,
    Ready {
        category: String,
        strategy: String,
        items: Vec<FeedItem>,
        updated_at: DateTime<Utc>,
    },
    Exhausted {
        category: String,
        last_items: Vec<FeedItem>,
        attempts: Vec<String>,
        failed_at: DateTime<Utc>,
    },
}

/// One headline as shown on the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsEntry {
    pub number: usize,
    pub title: String,
    pub link: Option<String>,
    pub published: Option<String>,
    /// Empty when the item carries no parseable timestamp.
    pub relative: String,
    pub is_old: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NewsView {
    Pending,
    Ready {
        category: String,
        label: &'static str,
        strategy: String,
        items: Vec<NewsEntry>,
        updated_at: DateTime<Utc>,
    },
    Exhausted {
        category: String,
        label: &'static str,
        items: Vec<NewsEntry>,
        attempts: Vec<String>,
        failed_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub today: Option<TodaySummary>,
    pub grid: Option<CalendarGrid>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelSnapshot {
    pub calendar: CalendarView,
    pub weather: WeatherView,
    pub news: NewsView,
}

/// Relative labels are computed against `now` at read time.
pub fn news_entries<Tz: TimeZone>(items: &[FeedItem], now: &DateTime<Tz>) -> Vec<NewsEntry> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let relative = item
                .published_at()
                .map(|p| datemath::relative_time(&p.with_timezone(&now.timezone()), now));
            NewsEntry {
                number: i + 1,
                title: item.title.clone(),
                link: item.link.clone(),
                published: item.published.clone(),
                relative: relative.map(|r| r.to_string()).unwrap_or_default(),
                is_old: relative.is_some_and(|r| r.is_old()),
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct PanelState {
    pub weather: WeatherView,
    pub news: NewsState,
    pub today: Option<TodaySummary>,
    pub calendar: Option<CalendarGrid>,
    pub calendar_error: Option<String>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            weather: WeatherView::Pending,
            news: NewsState::Pending,
            today: None,
            calendar: None,
            calendar_error: None,
        }
    }
}

impl PanelState {
    pub fn apply_weather(
        &mut self,
        region: &str,
        result: Result<NormalizedForecast, WeatherError>,
        now: DateTime<Utc>,
    ) {
        let region_name = regions::region_name(region);
        self.weather = match result {
            Ok(forecast) => WeatherView::Ready {
                region: region.to_string(),
                region_name,
                forecast,
                updated_at: now,
            },
            Err(e) => WeatherView::Error {
                region: region.to_string(),
                region_name,
                message: e.to_string(),
                failed_at: now,
            },
        };
    }

    pub fn apply_news(
        &mut self,
        category: &str,
        result: Result<Retrieved, FetchExhausted>,
        now: DateTime<Utc>,
    ) {
        self.news = match result {
            Ok(Retrieved { strategy, items }) => NewsState::Ready {
                category: category.to_string(),
                strategy,
                items,
                updated_at: now,
            },
            Err(exhausted) => NewsState::Exhausted {
                category: category.to_string(),
                last_items: self.last_items_for(category),
                attempts: exhausted
                    .attempts
                    .iter()
                    .map(|a| format!("{}: {}", a.strategy, a.error))
                    .collect(),
                failed_at: now,
            },
        };
    }

    /// Headlines currently on screen, if they belong to `category`.
    fn last_items_for(&self, category: &str) -> Vec<FeedItem> {
        match &self.news {
            NewsState::Ready {
                category: c, items, ..
            } if c == category => items.clone(),
            NewsState::Exhausted {
                category: c,
                last_items,
                ..
            } if c == category => last_items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn apply_calendar<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        self.today = Some(calendar::today_summary(now));
        match calendar::current_month(now) {
            Ok(grid) => {
                self.calendar = Some(grid);
                self.calendar_error = None;
            }
            Err(e) => self.calendar_error = Some(e.to_string()),
        }
    }

    pub fn calendar_view(&self) -> CalendarView {
        CalendarView {
            today: self.today.clone(),
            grid: self.calendar.clone(),
            error: self.calendar_error.clone(),
        }
    }

    pub fn news_view<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> NewsView {
        match &self.news {
            NewsState::Pending => NewsView::Pending,
            NewsState::Ready {
                category,
                strategy,
                items,
                updated_at,
            } => NewsView::Ready {
                category: category.clone(),
                label: categories::label(category),
                strategy: strategy.clone(),
                items: news_entries(items, now),
                updated_at: *updated_at,
            },
            NewsState::Exhausted {
                category,
                last_items,
                attempts,
                failed_at,
            } => NewsView::Exhausted {
                category: category.clone(),
                label: categories::label(category),
                items: news_entries(last_items, now),
                attempts: attempts.clone(),
                failed_at: *failed_at,
            },
        }
    }

    pub fn snapshot<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> PanelSnapshot {
        PanelSnapshot {
            calendar: self.calendar_view(),
            weather: self.weather.clone(),
            news: self.news_view(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AttemptError, StrategyFailure};

    fn exhausted() -> FetchExhausted {
        FetchExhausted {
            attempts: vec![StrategyFailure {
                strategy: "direct".into(),
                error: AttemptError::Status(503),
            }],
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn exhaustion_keeps_headlines_of_same_category() {
        let mut st = PanelState::default();
        let items = vec![FeedItem::new("kept")];
        st.apply_news(
            "main",
            Ok(Retrieved {
                strategy: "direct".into(),
                items: items.clone(),
            }),
            now(),
        );
        st.apply_news("main", Err(exhausted()), now());
        match &st.news {
            NewsState::Exhausted {
                last_items,
                attempts,
                ..
            } => {
                assert_eq!(last_items, &items);
                assert_eq!(attempts, &vec!["direct: non-success HTTP status 503".to_string()]);
            }
            other => panic!("unexpected state {other:?}"),
        }

        // A second failure still shows the same headlines.
        st.apply_news("main", Err(exhausted()), now());
        assert!(matches!(&st.news, NewsState::Exhausted { last_items, .. } if last_items == &items));
    }

    #[test]
    fn exhaustion_after_category_switch_is_empty() {
        let mut st = PanelState::default();
        st.apply_news(
            "main",
            Ok(Retrieved {
                strategy: "direct".into(),
                items: vec![FeedItem::new("old")],
            }),
            now(),
        );
        st.apply_news("sports", Err(exhausted()), now());
        assert!(matches!(&st.news, NewsState::Exhausted { last_items, .. } if last_items.is_empty()));
    }

    #[test]
    fn entries_carry_relative_labels() {
        let items = vec![
            FeedItem::new("fresh").with_published("Mon, 15 Jan 2024 11:55:00 +0000"),
            FeedItem::new("undated"),
            FeedItem::new("old").with_published("Fri, 12 Jan 2024 12:00:00 +0000"),
        ];
        let entries = news_entries(&items, &now());
        assert_eq!(entries[0].relative, "5 minutes ago");
        assert!(!entries[0].is_old);
        assert_eq!(entries[1].relative, "");
        assert_eq!(entries[2].relative, "3 days ago");
        assert!(entries[2].is_old);
        assert_eq!(entries[2].number, 3);
    }

    #[test]
    fn weather_error_is_stored_as_data() {
        let mut st = PanelState::default();
        st.apply_weather("130000", Err(WeatherError::Status(500)), now());
        match &st.weather {
            WeatherView::Error {
                region_name,
                message,
                ..
            } => {
                assert_eq!(*region_name, "Tokyo");
                assert!(message.contains("500"));
            }
            other => panic!("unexpected view {other:?}"),
        }
    }
}
