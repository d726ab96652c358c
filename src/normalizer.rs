use crate::types::{CanonicalItem, FeedDescriptor, RawItem};
use crate::utils;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use url::Url;

const PREVIEW_MAX_LEN: usize = 300;

/// Convert a raw entry into the canonical shape.
///
/// Undated items take `fallback` (the fetch time of the producing batch)
/// so they are treated as just published rather than discarded by the
/// recency filter.
pub fn normalize(raw: &RawItem, feed: &FeedDescriptor, fallback: DateTime<Utc>) -> CanonicalItem {
    let published = raw.published.unwrap_or(fallback);
    let preview = raw
        .summary
        .as_deref()
        .map(|s| utils::truncate_text(s, PREVIEW_MAX_LEN))
        .unwrap_or_default();

    CanonicalItem {
        fingerprint: fingerprint(&raw.title, &raw.link),
        title: raw.title.clone(),
        link: raw.link.clone(),
        source: feed.name.clone(),
        category: feed.category.clone(),
        published,
        preview,
        score: 0.0,
    }
}

/// Duplicate-detection key over normalized title + link. Two items must
/// agree on both to collapse.
pub fn fingerprint(title: &str, link: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_title(title));
    hasher.update("\n");
    hasher.update(canonical_link(link));
    hex::encode(hasher.finalize())
}

/// Lower-case, drop punctuation, collapse whitespace runs.
fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-cased link with query and fragment stripped.
fn canonical_link(link: &str) -> String {
    match Url::parse(link.trim()) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.as_str().trim_end_matches('/').to_lowercase()
        }
        Err(_) => link.trim().to_lowercase(),
    }
}
