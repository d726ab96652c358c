use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a configured feed source. Supplied by configuration and
/// immutable for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedDescriptor {
    pub name: String,
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Lower-cased weekday names. When present, the feed is only fetched
    /// on those days.
    #[serde(default)]
    pub days: Option<Vec<String>>,
}

fn default_category() -> String {
    "General".to_string()
}

/// An entry as returned by parsing a feed. The published timestamp may be
/// absent when the source omits it or ships an unparseable date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItem {
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

/// Successful pull from a feed source: the capped raw items plus the
/// transport status when the source is HTTP-backed.
#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub items: Vec<RawItem>,
    pub http_status: Option<u16>,
}

/// The normalized, rankable unit of work.
///
/// `fingerprint` is a pure function of the normalized title and link, so
/// two items referring to the same story collapse regardless of which feed
/// carried them. `score` is computed by the ranker per run and never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalItem {
    pub title: String,
    pub link: String,
    pub source: String,
    pub category: String,
    pub published: DateTime<Utc>,
    pub preview: String,
    pub fingerprint: String,
    #[serde(skip)]
    pub score: f64,
}

/// One feed's cached fetch result. An entry older than the TTL is treated
/// as absent, not stale-but-usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub fetched_at: DateTime<Utc>,
    pub items: Vec<RawItem>,
}

/// Outcome of fetching one feed. A failed fetch is data consumed by the
/// orchestration loop, not an unwound error: the feed contributes zero
/// items and the run continues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchReport {
    pub feed: String,
    pub success: bool,
    pub items_found: usize,
    pub error: Option<String>,
    pub fetch_time: DateTime<Utc>,
    pub response_time_ms: u64,
    pub http_status: Option<u16>,
    pub from_cache: bool,
}

/// The ordered, deduplicated, capped output handed to the summarizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateList {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<CanonicalItem>,
}

/// Injectable time source so cache expiry, recency filtering, and scoring
/// are testable at fixed instants.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BriefError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetch failed: {reason}")]
    Fetch {
        status: Option<u16>,
        reason: String,
    },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Config file error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BriefError>;
