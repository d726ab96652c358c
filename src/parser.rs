use crate::types::{BriefError, RawItem, Result};
use chrono::Utc;
use feed_rs::parser;
use tracing::debug;

/// Parse RSS/Atom content into raw items, keeping the first `limit`
/// entries in source order.
pub fn parse_items(content: &str, limit: usize) -> Result<Vec<RawItem>> {
    let feed = parser::parse(content.as_bytes())
        .map_err(|e| BriefError::Parse(format!("failed to parse feed: {}", e)))?;

    let mut items = Vec::new();

    for entry in feed.entries.into_iter().take(limit) {
        if let Some(item) = parse_entry(entry) {
            items.push(item);
        }
    }

    debug!("Parsed {} feed entries", items.len());
    Ok(items)
}

/// Entries without a link carry nothing actionable and are skipped.
fn parse_entry(entry: feed_rs::model::Entry) -> Option<RawItem> {
    let link = entry.links.first()?.href.clone();

    let title = entry
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| "Untitled".to_string());

    // Prefer the summary, fall back to full content.
    let summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body));

    let published = entry.published.map(|dt| dt.with_timezone(&Utc));

    Some(RawItem {
        title,
        link,
        summary,
        published,
    })
}
