use crate::cache::{FeedCache, CACHE_TTL_SECS};
use crate::config::BriefConfig;
use crate::fetcher::FeedSource;
use crate::normalizer;
use crate::ranking;
use crate::selection;
use crate::types::{
    BriefError, CandidateList, CanonicalItem, Clock, FeedDescriptor, FetchReport, RawItem, Result,
};
use chrono::{DateTime, Duration, Utc};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// One run's worth of pipeline state: configuration, cache, feed source,
/// and clock, constructed per invocation and dropped afterwards. Nothing
/// is shared across runs except the advisory cache file.
pub struct BriefPipeline {
    config: BriefConfig,
    cache: FeedCache,
    source: Box<dyn FeedSource>,
    clock: Box<dyn Clock>,
    reports: Vec<FetchReport>,
}

impl BriefPipeline {
    pub fn new(
        config: BriefConfig,
        cache: FeedCache,
        source: Box<dyn FeedSource>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cache,
            source,
            clock,
            reports: Vec::new(),
        })
    }

    /// Fetch, normalize, dedupe, filter, and rank every scheduled feed
    /// into a bounded candidate list. Per-feed failures are recorded and
    /// never abort the run; an empty list is a valid result.
    pub async fn run(&mut self) -> Result<CandidateList> {
        let now = self.clock.now();
        let ttl = Duration::seconds(CACHE_TTL_SECS);
        let settings = self.config.settings.clone();
        let feeds = self.config.feeds.clone();

        info!("Running brief pipeline over {} feeds", feeds.len());
        self.reports.clear();

        let mut all_items: Vec<CanonicalItem> = Vec::new();
        for feed in &feeds {
            if !scheduled_today(feed, now) {
                info!("Skipping {} (not scheduled for today)", feed.name);
                continue;
            }

            let (report, items) = self
                .collect_feed(
                    feed,
                    settings.max_articles_per_feed,
                    settings.use_cache,
                    ttl,
                    now,
                )
                .await;
            self.reports.push(report);
            all_items.extend(items);
        }

        let failed = self.reports.iter().filter(|r| !r.success).count();
        info!(
            "Fetched {} items across {} feeds ({} failed)",
            all_items.len(),
            self.reports.len(),
            failed
        );

        let unique = selection::dedupe(all_items);
        info!("{} unique items after deduplication", unique.len());

        let recent = selection::filter_recent(unique, settings.filter_hours, now);
        info!(
            "{} items within the {}h horizon",
            recent.len(),
            settings.filter_hours
        );

        let selected = ranking::rank(
            recent,
            &settings.scoring,
            settings.max_articles_to_summarize,
            now,
        );
        info!("Selected {} candidate items", selected.len());

        if let Err(e) = self.cache.persist() {
            warn!("Could not persist feed cache: {}", e);
        }

        Ok(CandidateList {
            run_id: Uuid::new_v4(),
            generated_at: now,
            items: selected,
        })
    }

    /// Per-feed outcomes of the most recent run.
    pub fn fetch_reports(&self) -> &[FetchReport] {
        &self.reports
    }

    async fn collect_feed(
        &mut self,
        feed: &FeedDescriptor,
        limit: usize,
        use_cache: bool,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> (FetchReport, Vec<CanonicalItem>) {
        let started = Instant::now();

        if use_cache {
            if let Some(entry) = self.cache.get(&feed.url, ttl, now) {
                info!(
                    "Using cached items for {} (fetched {})",
                    feed.name, entry.fetched_at
                );
                // Undated cached items fall back to the entry's fetch
                // time, so a warm run selects the same items as the cold
                // run that populated it.
                let items = normalize_batch(&entry.items, feed, entry.fetched_at);
                let report = FetchReport {
                    feed: feed.name.clone(),
                    success: true,
                    items_found: items.len(),
                    error: None,
                    fetch_time: entry.fetched_at,
                    response_time_ms: 0,
                    http_status: None,
                    from_cache: true,
                };
                return (report, items);
            }
        }

        match self.source.fetch(feed, limit).await {
            Ok(fetched) => {
                info!("Fetched {} items from {}", fetched.items.len(), feed.name);
                let items = normalize_batch(&fetched.items, feed, now);
                self.cache.put(&feed.url, fetched.items, now);
                let report = FetchReport {
                    feed: feed.name.clone(),
                    success: true,
                    items_found: items.len(),
                    error: None,
                    fetch_time: now,
                    response_time_ms: started.elapsed().as_millis() as u64,
                    http_status: fetched.http_status,
                    from_cache: false,
                };
                (report, items)
            }
            Err(e) => {
                warn!("Fetch failed for {}: {}", feed.name, e);
                let http_status = match &e {
                    BriefError::Fetch { status, .. } => *status,
                    _ => None,
                };
                let report = FetchReport {
                    feed: feed.name.clone(),
                    success: false,
                    items_found: 0,
                    error: Some(e.to_string()),
                    fetch_time: now,
                    response_time_ms: started.elapsed().as_millis() as u64,
                    http_status,
                    from_cache: false,
                };
                (report, Vec::new())
            }
        }
    }
}

/// A feed with a `days` list only runs on those weekdays (UTC, from the
/// injected clock).
fn scheduled_today(feed: &FeedDescriptor, now: DateTime<Utc>) -> bool {
    match &feed.days {
        Some(days) if !days.is_empty() => {
            let today = now.format("%A").to_string().to_lowercase();
            days.iter().any(|day| day.to_lowercase() == today)
        }
        _ => true,
    }
}

fn normalize_batch(
    raw: &[RawItem],
    feed: &FeedDescriptor,
    fetched_at: DateTime<Utc>,
) -> Vec<CanonicalItem> {
    raw.iter()
        .map(|item| normalizer::normalize(item, feed, fetched_at))
        .collect()
}
