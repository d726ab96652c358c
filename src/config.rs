use crate::ranking::ScoringConfig;
use crate::types::{BriefError, FeedDescriptor, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Feed list plus scalar settings, loaded from a TOML file once per run.
#[derive(Debug, Clone, Deserialize)]
pub struct BriefConfig {
    pub feeds: Vec<FeedDescriptor>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cap on items taken from a single feed, most recent first.
    pub max_articles_per_feed: usize,
    /// Cap on the final candidate list handed to the summarizer.
    pub max_articles_to_summarize: usize,
    /// Recency horizon in hours; older items are dropped.
    pub filter_hours: i64,
    pub use_cache: bool,
    pub fetch: FetchSettings,
    pub scoring: ScoringConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_articles_per_feed: 5,
            max_articles_to_summarize: 20,
            filter_hours: 48,
            use_cache: true,
            fetch: FetchSettings::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub follow_redirects: bool,
    pub max_redirects: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: "daily-brief/0.1".to_string(),
            timeout_seconds: 30,
            max_retries: 2,
            retry_delay_seconds: 2,
            follow_redirects: true,
            max_redirects: 5,
        }
    }
}

impl BriefConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: BriefConfig = toml::from_str(content)?;
        config.validate()?;
        debug!("Loaded configuration with {} feeds", config.feeds.len());
        Ok(config)
    }

    /// A run without feeds or with non-positive limits cannot produce a
    /// meaningful candidate list; fail before any fetch is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.feeds.is_empty() {
            return Err(BriefError::Config("no feeds configured".to_string()));
        }

        for feed in &self.feeds {
            if feed.name.trim().is_empty() {
                return Err(BriefError::Config(format!(
                    "feed without a name: {}",
                    feed.url
                )));
            }
            let parsed = Url::parse(&feed.url)?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(BriefError::Config(format!(
                    "feed {} has a non-HTTP url: {}",
                    feed.name, feed.url
                )));
            }
        }

        if self.settings.max_articles_per_feed == 0 {
            return Err(BriefError::Config(
                "max_articles_per_feed must be positive".to_string(),
            ));
        }
        if self.settings.max_articles_to_summarize == 0 {
            return Err(BriefError::Config(
                "max_articles_to_summarize must be positive".to_string(),
            ));
        }
        if self.settings.filter_hours <= 0 {
            return Err(BriefError::Config(
                "filter_hours must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
