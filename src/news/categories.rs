// src/news/categories.rs
//! NHK news categories: settings code → label and RSS URL.

pub const DEFAULT_CATEGORY: &str = "main";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub code: &'static str,
    pub label: &'static str,
    pub feed_url: &'static str,
}

const CATEGORIES: &[Category] = &[
    Category {
        code: "main",
        label: "Top Stories",
        feed_url: "https://www.nhk.or.jp/rss/news/cat0.xml",
    },
    Category {
        code: "society",
        label: "Society",
        feed_url: "https://news.web.nhk/n-data/conf/na/rss/cat1.xml",
    },
    Category {
        code: "science",
        label: "Science & Culture",
        feed_url: "https://www.nhk.or.jp/rss/news/cat3.xml",
    },
    Category {
        code: "politics",
        label: "Politics",
        feed_url: "https://www.nhk.or.jp/rss/news/cat4.xml",
    },
    Category {
        code: "business",
        label: "Business",
        feed_url: "https://www.nhk.or.jp/rss/news/cat5.xml",
    },
    Category {
        code: "world",
        label: "World",
        feed_url: "https://www.nhk.or.jp/rss/news/cat6.xml",
    },
    Category {
        code: "sports",
        label: "Sports",
        feed_url: "https://www.nhk.or.jp/rss/news/cat7.xml",
    },
    Category {
        code: "lifestyle",
        label: "Lifestyle",
        feed_url: "https://www.nhk.or.jp/rss/news/cat2.xml",
    },
];

/// Category for `code`; unknown codes resolve to the top-stories feed.
pub fn resolve(code: &str) -> &'static Category {
    let code = code.trim();
    CATEGORIES
        .iter()
        .find(|c| c.code == code)
        .unwrap_or(&CATEGORIES[0])
}

pub fn label(code: &str) -> &'static str {
    resolve(code).label
}

pub fn feed_url(code: &str) -> &'static str {
    resolve(code).feed_url
}

pub fn all() -> &'static [Category] {
    CATEGORIES
}
