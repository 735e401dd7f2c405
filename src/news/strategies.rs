// src/news/strategies.rs
//! Built-in retrieval strategies, most reliable first.

use reqwest::Url;

use super::normalize::to_feed_items;
use super::types::{FeedItem, PayloadShape, RetrievalStrategy};
use crate::error::{FeedError, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    /// Request the feed URL as-is.
    Direct,
    /// Pass the feed URL as an encoded query parameter of a relay endpoint.
    Relay {
        base: &'static str,
        param: &'static str,
    },
}

/// A strategy defined by an endpoint layout and a payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyStrategy {
    name: &'static str,
    endpoint: Endpoint,
    shape: PayloadShape,
}

impl ProxyStrategy {
    pub const fn direct(name: &'static str) -> Self {
        Self {
            name,
            endpoint: Endpoint::Direct,
            shape: PayloadShape::Markup,
        }
    }

    pub const fn relay(
        name: &'static str,
        base: &'static str,
        param: &'static str,
        shape: PayloadShape,
    ) -> Self {
        Self {
            name,
            endpoint: Endpoint::Relay { base, param },
            shape,
        }
    }

    pub fn shape(&self) -> PayloadShape {
        self.shape
    }
}

impl RetrievalStrategy for ProxyStrategy {
    fn name(&self) -> &str {
        self.name
    }

    fn build_address(&self, target_url: &str) -> Result<String, TransportError> {
        let target =
            Url::parse(target_url).map_err(|e| TransportError::Address(format!("{target_url}: {e}")))?;
        match self.endpoint {
            Endpoint::Direct => Ok(target.to_string()),
            Endpoint::Relay { base, param } => Url::parse_with_params(base, &[(param, target.as_str())])
                .map(String::from)
                .map_err(|e| TransportError::Address(format!("{base}: {e}"))),
        }
    }

    fn parse_response(&self, body: &str) -> Result<Vec<FeedItem>, FeedError> {
        to_feed_items(body, self.shape)
    }
}

pub const DIRECT: ProxyStrategy = ProxyStrategy::direct("direct");
pub const RSS2JSON: ProxyStrategy = ProxyStrategy::relay(
    "rss2json",
    "https://api.rss2json.com/v1/api.json",
    "rss_url",
    PayloadShape::JsonWrapped,
);
pub const CORSPROXY: ProxyStrategy = ProxyStrategy::relay(
    "corsproxy",
    "https://corsproxy.io/",
    "url",
    PayloadShape::Markup,
);
pub const ALLORIGINS: ProxyStrategy = ProxyStrategy::relay(
    "allorigins",
    "https://api.allorigins.win/raw",
    "url",
    PayloadShape::Markup,
);
pub const CODETABS: ProxyStrategy = ProxyStrategy::relay(
    "codetabs",
    "https://api.codetabs.com/v1/proxy",
    "quest",
    PayloadShape::Markup,
);

/// Default trial order.
pub fn default_strategies() -> Vec<Box<dyn RetrievalStrategy>> {
    [DIRECT, RSS2JSON, CORSPROXY, ALLORIGINS, CODETABS]
        .into_iter()
        .map(|s| Box::new(s) as Box<dyn RetrievalStrategy>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "https://www.nhk.or.jp/rss/news/cat0.xml";

    #[test]
    fn relay_addresses_encode_the_target() {
        assert_eq!(
            ALLORIGINS.build_address(FEED).unwrap(),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fwww.nhk.or.jp%2Frss%2Fnews%2Fcat0.xml"
        );
        assert_eq!(
            CODETABS.build_address(FEED).unwrap(),
            "https://api.codetabs.com/v1/proxy?quest=https%3A%2F%2Fwww.nhk.or.jp%2Frss%2Fnews%2Fcat0.xml"
        );
        assert_eq!(DIRECT.build_address(FEED).unwrap(), FEED);
    }

    #[test]
    fn invalid_target_is_an_address_error() {
        assert!(matches!(
            CORSPROXY.build_address("not a url"),
            Err(TransportError::Address(_))
        ));
    }

    #[test]
    fn default_order_is_fixed() {
        let names: Vec<_> = default_strategies()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["direct", "rss2json", "corsproxy", "allorigins", "codetabs"]
        );
        assert_eq!(RSS2JSON.shape(), PayloadShape::JsonWrapped);
    }
}
