// src/news/mod.rs
pub mod categories;
pub mod fallback;
pub mod normalize;
pub mod strategies;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

pub use fallback::{FeedFallbackClient, Retrieved};
pub use normalize::{prepare_for_display, to_feed_items};
pub use types::{FeedItem, PayloadShape, RetrievalStrategy};

use crate::error::FetchExhausted;
use crate::transport::Transport;

/// Default number of headlines on the panel.
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

/// Category-aware news refresh: resolve feed URL, run the fallback chain,
/// order and cap the result for display.
pub struct NewsService {
    client: FeedFallbackClient,
    strategies: Vec<Box<dyn RetrievalStrategy>>,
    display_limit: usize,
}

impl NewsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            client: FeedFallbackClient::new(transport),
            strategies: strategies::default_strategies(),
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }

    pub fn with_strategies(mut self, strategies: Vec<Box<dyn RetrievalStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.with_timeout(timeout);
        self
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub async fn fetch(&self, category: &str) -> Result<Retrieved, FetchExhausted> {
        let feed_url = categories::feed_url(category);
        let retrieved = self.client.retrieve(&self.strategies, feed_url).await?;
        Ok(Retrieved {
            items: prepare_for_display(retrieved.items, self.display_limit),
            strategy: retrieved.strategy,
        })
    }
}
