// src/news/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use time::{
    format_description::well_known::{Rfc2822, Rfc3339},
    macros::format_description,
    OffsetDateTime, PrimitiveDateTime,
};

use crate::error::{FeedError, TransportError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: Option<String>,
    /// Source-native timestamp text; parsed on demand.
    pub published: Option<String>,
}

impl FeedItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: None,
            published: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published.as_deref().and_then(parse_published)
    }
}

/// Parse RSS (RFC 2822), Atom/ISO (RFC 3339) or the converter's
/// `YYYY-MM-DD HH:MM:SS` UTC form.
pub fn parse_published(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    let odt = OffsetDateTime::parse(ts, &Rfc2822)
        .or_else(|_| OffsetDateTime::parse(ts, &Rfc3339))
        .or_else(|_| {
            PrimitiveDateTime::parse(
                ts,
                format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
            )
            .map(PrimitiveDateTime::assume_utc)
        })
        .ok()?;
    DateTime::from_timestamp(odt.unix_timestamp(), odt.nanosecond())
}

/// How a strategy's response body is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// `{"status": "ok", "items": [...]}` produced by a feed-to-JSON converter.
    JsonWrapped,
    /// Raw RSS markup.
    Markup,
}

/// One named way of reaching a feed and interpreting the response.
pub trait RetrievalStrategy: Send + Sync {
    fn name(&self) -> &str;
    /// Concrete address to request for `target_url`.
    fn build_address(&self, target_url: &str) -> Result<String, TransportError>;
    fn parse_response(&self, body: &str) -> Result<Vec<FeedItem>, FeedError>;
}
