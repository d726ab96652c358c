use crate::types::{CacheEntry, RawItem, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Cached fetch results older than this are treated as absent.
pub const CACHE_TTL_SECS: i64 = 60 * 60;

/// Time-to-live keyed store mapping a feed URL to its last fetch result.
///
/// The store is a pure performance optimization: deleting the persisted
/// file loses nothing but the next run's network round-trips.
pub struct FeedCache {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl FeedCache {
    /// Load the persisted store. A missing or corrupt file is an empty
    /// cache, never a failed run.
    pub fn load(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => {
                    debug!("Loaded feed cache from {}", path.display());
                    entries
                }
                Err(e) => {
                    warn!(
                        "Discarding unreadable feed cache {}: {}",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path: path.to_path_buf(),
            entries,
        }
    }

    /// A hit requires an entry whose fetch timestamp is no older than
    /// `now - ttl`.
    pub fn get(&self, url: &str, ttl: Duration, now: DateTime<Utc>) -> Option<&CacheEntry> {
        let entry = self.entries.get(url)?;
        if now.signed_duration_since(entry.fetched_at) <= ttl {
            Some(entry)
        } else {
            None
        }
    }

    /// Overwrite any prior entry for this feed, stamped with `now`.
    pub fn put(&mut self, url: &str, items: Vec<RawItem>, now: DateTime<Utc>) {
        self.entries.insert(
            url.to_string(),
            CacheEntry {
                fetched_at: now,
                items,
            },
        );
    }

    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        info!(
            "Saved {} cached feeds to {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
