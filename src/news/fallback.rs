// src/news/fallback.rs
//! Ordered multi-strategy retrieval: first non-empty result wins.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;

use super::types::{FeedItem, RetrievalStrategy};
use crate::error::{AttemptError, FeedError, FetchExhausted, StrategyFailure, TransportError};
use crate::transport::Transport;

/// Upper bound for a single strategy attempt.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Items plus the name of the strategy that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrieved {
    pub strategy: String,
    pub items: Vec<FeedItem>,
}

pub struct FeedFallbackClient {
    transport: Arc<dyn Transport>,
    attempt_timeout: Duration,
}

impl FeedFallbackClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Try `strategies` strictly in order against `target_url`.
    ///
    /// Transport errors, non-2xx statuses, payload errors and empty item lists all
    /// count as failure of that strategy; the next one is tried. Stops at the first
    /// non-empty result, so later strategies are never touched.
    pub async fn retrieve(
        &self,
        strategies: &[Box<dyn RetrievalStrategy>],
        target_url: &str,
    ) -> Result<Retrieved, FetchExhausted> {
        let mut attempts = Vec::with_capacity(strategies.len());

        for strategy in strategies {
            let name = strategy.name().to_string();
            counter!("news_strategy_attempts_total", "strategy" => name.clone()).increment(1);
            tracing::debug!(strategy = %name, feed = target_url, "trying feed strategy");

            match self.attempt(strategy.as_ref(), target_url).await {
                Ok(items) => {
                    tracing::info!(strategy = %name, items = items.len(), "feed retrieved");
                    return Ok(Retrieved {
                        strategy: name,
                        items,
                    });
                }
                Err(error) => {
                    tracing::warn!(strategy = %name, error = %error, "feed strategy failed");
                    counter!("news_strategy_failures_total", "strategy" => name.clone())
                        .increment(1);
                    attempts.push(StrategyFailure {
                        strategy: name,
                        error,
                    });
                }
            }
        }

        counter!("news_fetch_exhausted_total").increment(1);
        tracing::error!(
            feed = target_url,
            tried = attempts.len(),
            "all feed strategies failed"
        );
        Err(FetchExhausted { attempts })
    }

    async fn attempt(
        &self,
        strategy: &dyn RetrievalStrategy,
        target_url: &str,
    ) -> Result<Vec<FeedItem>, AttemptError> {
        let address = strategy.build_address(target_url)?;

        // Enforced here as well so a transport that ignores its timeout cannot stall the chain.
        let resp = tokio::time::timeout(
            self.attempt_timeout,
            self.transport.get(&address, self.attempt_timeout),
        )
        .await
        .map_err(|_| TransportError::Timeout(self.attempt_timeout))??;

        if !resp.is_success() {
            return Err(AttemptError::Status(resp.status));
        }

        let items = strategy.parse_response(&resp.body)?;
        if items.is_empty() {
            return Err(FeedError::Empty.into());
        }
        Ok(items)
    }
}
