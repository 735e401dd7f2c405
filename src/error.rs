// src/error.rs
//! Error taxonomy of the acquisition core.
//!
//! Failures are recovered as close to their origin as possible; only
//! [`FetchExhausted`] and [`ForecastError::UnparseableDocument`] reach the panel
//! state, and both are stored as data rather than propagated to the scheduler.

use std::time::Duration;

use thiserror::Error;

/// Required top-level fields of a forecast document are absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("unparseable forecast document: missing {0}")]
    UnparseableDocument(&'static str),
}

/// A single strategy's payload failed shape/status validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("invalid feed payload: {0}")]
    InvalidFeedPayload(String),
    #[error("feed payload contained no usable items")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid address: {0}")]
    Address(String),
    #[error("request failed: {0}")]
    Request(String),
}

/// Why one strategy attempt did not produce items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("non-success HTTP status {0}")]
    Status(u16),
    #[error(transparent)]
    Feed(#[from] FeedError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFailure {
    pub strategy: String,
    pub error: AttemptError,
}

/// Every configured strategy failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("all {} feed strategies failed", .attempts.len())]
pub struct FetchExhausted {
    /// One entry per attempted strategy, in trial order.
    pub attempts: Vec<StrategyFailure>,
}

impl FetchExhausted {
    pub fn strategy_names(&self) -> Vec<&str> {
        self.attempts.iter().map(|a| a.strategy.as_str()).collect()
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("weather endpoint returned HTTP {0}")]
    Status(u16),
    #[error("weather document is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Document(#[from] ForecastError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("no such month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("unknown settings key: {0}")]
    UnknownKey(String),
}
