use crate::types::CanonicalItem;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use tracing::{debug, info};

/// Drop items whose fingerprint was already seen, keeping the first
/// occurrence in input order. Input order is the concatenation of each
/// feed's fetch order, feeds in configuration order, which makes the
/// first-occurrence rule deterministic.
pub fn dedupe(items: Vec<CanonicalItem>) -> Vec<CanonicalItem> {
    let total = items.len();
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(total);

    for item in items {
        if seen.insert(item.fingerprint.clone()) {
            unique.push(item);
        } else {
            debug!("Removing duplicate item: {} ({})", item.title, item.link);
        }
    }

    let removed = total - unique.len();
    if removed > 0 {
        info!("Removed {} duplicate items", removed);
    }

    unique
}

/// Retain items published within the horizon. The boundary is inclusive:
/// an item exactly `horizon_hours` old survives.
pub fn filter_recent(
    items: Vec<CanonicalItem>,
    horizon_hours: i64,
    now: DateTime<Utc>,
) -> Vec<CanonicalItem> {
    let cutoff = now - Duration::hours(horizon_hours);
    let total = items.len();

    let recent: Vec<CanonicalItem> = items
        .into_iter()
        .filter(|item| item.published >= cutoff)
        .collect();

    let filtered = total - recent.len();
    if filtered > 0 {
        info!("Filtered out {} items older than {}h", filtered, horizon_hours);
    }

    recent
}
