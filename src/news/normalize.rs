// src/news/normalize.rs
//! Raw strategy payloads → ordered [`FeedItem`] sequences.

use std::cmp::Reverse;

use metrics::histogram;
use once_cell::sync::Lazy;
use quick_xml::de::from_str;
use regex::Regex;
use serde::Deserialize;

use super::types::{FeedItem, PayloadShape};
use crate::error::FeedError;

const MAX_TITLE_CHARS: usize = 300;
const JSON_STATUS_OK: &str = "ok";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonFeed {
    status: Option<String>,
    #[serde(default)]
    items: Vec<JsonItem>,
}

#[derive(Debug, Deserialize)]
struct JsonItem {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Normalize display text: decode entities, strip tags, collapse whitespace.
/// Output is capped at 300 characters.
pub fn normalize_text(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);
    let stripped = RE_TAGS.replace_all(&decoded, "");
    let collapsed = RE_WS.replace_all(&stripped, " ");
    let out = collapsed.trim();
    if out.chars().count() > MAX_TITLE_CHARS {
        out.chars().take(MAX_TITLE_CHARS).collect()
    } else {
        out.to_string()
    }
}

/// HTML-only entities that make otherwise valid RSS fail XML parsing.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Every field is optional; a missing title becomes the empty string.
fn to_item(title: Option<String>, link: Option<String>, published: Option<String>) -> FeedItem {
    FeedItem {
        title: normalize_text(title.as_deref().unwrap_or_default()),
        link: non_blank(link),
        published: non_blank(published),
    }
}

/// Parse raw RSS markup. Fields are individually optional; malformed markup is an error.
pub fn parse_markup(body: &str) -> Result<Vec<FeedItem>, FeedError> {
    let xml_clean = scrub_html_entities_for_xml(body);
    let rss: Rss = from_str(&xml_clean)
        .map_err(|e| FeedError::InvalidFeedPayload(format!("rss markup: {e}")))?;
    Ok(rss
        .channel
        .item
        .into_iter()
        .map(|it| to_item(it.title, it.link, it.pub_date))
        .collect())
}

/// Parse a JSON-wrapped feed; the status flag must be `"ok"`.
pub fn parse_json(body: &str) -> Result<Vec<FeedItem>, FeedError> {
    let feed: JsonFeed = serde_json::from_str(body)
        .map_err(|e| FeedError::InvalidFeedPayload(format!("json feed: {e}")))?;
    match feed.status.as_deref() {
        Some(JSON_STATUS_OK) => {}
        other => {
            return Err(FeedError::InvalidFeedPayload(format!(
                "json feed status {:?}",
                other.unwrap_or("<missing>")
            )))
        }
    }
    Ok(feed
        .items
        .into_iter()
        .map(|it| to_item(it.title, it.link, it.pub_date))
        .collect())
}

/// Dispatch on payload shape and record parse latency.
pub fn to_feed_items(raw: &str, shape: PayloadShape) -> Result<Vec<FeedItem>, FeedError> {
    let t0 = std::time::Instant::now();
    let out = match shape {
        PayloadShape::JsonWrapped => parse_json(raw),
        PayloadShape::Markup => parse_markup(raw),
    };
    histogram!("feed_parse_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    out
}

/// Newest first. Items with a parseable timestamp come first in descending order;
/// the rest keep their source order after them. Stable, so repeated sorting is a no-op.
pub fn sort_by_published_desc(items: &mut [FeedItem]) {
    if items.iter().all(|it| it.published_at().is_none()) {
        return;
    }
    items.sort_by_cached_key(|it| match it.published_at() {
        Some(ts) => (0u8, Reverse(ts.timestamp_millis())),
        None => (1u8, Reverse(i64::MIN)),
    });
}

/// Drop untitled items, sort for display, then keep the first `limit` items.
pub fn prepare_for_display(mut items: Vec<FeedItem>, limit: usize) -> Vec<FeedItem> {
    items.retain(|it| !it.title.is_empty());
    sort_by_published_desc(&mut items);
    items.truncate(limit);
    items
}
