//! Minimal RSS 2.0 reader: `rss/channel/item` title and link.

use tracing::warn;

use crate::error::FeedError;
use crate::Headline;

/// First `limit` items of an RSS document, tagged with `source`.
///
/// Reading stops at the first item without a non-empty `title` or `link`;
/// the items before it are kept.
pub fn parse_items(xml: &str, source: &str, limit: usize) -> Result<Vec<Headline>, FeedError> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| FeedError::Parse(e.to_string()))?;
    let channel = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("channel"))
        .ok_or_else(|| FeedError::Parse("missing <channel>".to_string()))?;

    let mut headlines = Vec::new();
    for item in channel
        .children()
        .filter(|n| n.has_tag_name("item"))
        .take(limit)
    {
        match (child_text(item, "title"), child_text(item, "link")) {
            (Ok(title), Ok(link)) => headlines.push(Headline {
                title,
                link,
                source: source.to_string(),
            }),
            (Err(e), _) | (_, Err(e)) => {
                warn!(source, kept = headlines.len(), error = %e, "malformed feed item");
                break;
            }
        }
    }
    Ok(headlines)
}

fn child_text(item: roxmltree::Node<'_, '_>, tag: &str) -> Result<String, FeedError> {
    item.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| FeedError::Parse(format!("item without <{tag}>")))
}
