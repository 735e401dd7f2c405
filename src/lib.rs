// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod calendar;
pub mod config;
pub mod datemath;
pub mod error;
pub mod metrics;
pub mod news;
pub mod panel;
pub mod scheduler;
pub mod settings;
pub mod telemetry;
pub mod transport;
pub mod weather;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::AppConfig;
pub use crate::error::{FetchExhausted, ForecastError};
