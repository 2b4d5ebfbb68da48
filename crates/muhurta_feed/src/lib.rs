//! Market headlines from RSS feeds.
//!
//! Each source is fetched and parsed independently; a failing source is
//! logged and skipped. When nothing at all was collected the result is a
//! single placeholder headline, so callers always have something to show.

pub mod error;
pub mod rss;
pub mod transport;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use error::FeedError;
pub use rss::parse_items;
pub use transport::{DEFAULT_TIMEOUT, FeedTransport, HttpTransport, USER_AGENT};

/// Items taken from each source.
pub const DEFAULT_PER_SOURCE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub title: String,
    pub link: String,
    pub source: String,
}

impl Headline {
    /// Shown when every source failed.
    pub fn placeholder() -> Self {
        Self {
            title: "News Unavailable".to_string(),
            link: "#".to_string(),
            source: "System".to_string(),
        }
    }
}

/// A named RSS endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// Economic Times markets and MoneyControl market reports.
pub fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new(
            "Economic Times",
            "https://economictimes.indiatimes.com/markets/stocks/rssfeeds/2146842.cms",
        ),
        FeedSource::new(
            "MoneyControl",
            "https://www.moneycontrol.com/rss/marketreports.xml",
        ),
    ]
}

/// Headlines of one source.
pub fn fetch_source<T: FeedTransport + ?Sized>(
    transport: &T,
    source: &FeedSource,
    per_source: usize,
) -> Result<Vec<Headline>, FeedError> {
    let body = transport.fetch(&source.url)?;
    parse_items(&body, &source.name, per_source)
}

/// Up to `per_source` headlines from each source in order.
///
/// Never empty: falls back to [`Headline::placeholder`].
pub fn fetch_headlines<T: FeedTransport + ?Sized>(
    transport: &T,
    sources: &[FeedSource],
    per_source: usize,
) -> Vec<Headline> {
    let mut headlines = Vec::new();
    for source in sources {
        match fetch_source(transport, source, per_source) {
            Ok(items) => {
                debug!(source = %source.name, count = items.len(), "fetched headlines");
                headlines.extend(items);
            }
            Err(e) => warn!(source = %source.name, error = %e, "skipping feed source"),
        }
    }
    if headlines.is_empty() {
        headlines.push(Headline::placeholder());
    }
    headlines
}
