use crate::config::FetchSettings;
use crate::parser;
use crate::types::{BriefError, FeedDescriptor, FetchedFeed, Result};
use async_trait::async_trait;
use backoff::backoff::Backoff;
use backoff::exponential::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// A source of raw feed items. The HTTP implementation is the production
/// path; tests substitute in-memory sources.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch at most `limit` items for `feed`, taking the most recent
    /// entries as ordered by the source.
    async fn fetch(&self, feed: &FeedDescriptor, limit: usize) -> Result<FetchedFeed>;
}

pub struct HttpFeedSource {
    client: Client,
    settings: FetchSettings,
}

impl HttpFeedSource {
    pub fn new(settings: FetchSettings) -> Result<Self> {
        let redirect_policy = if settings.follow_redirects {
            reqwest::redirect::Policy::limited(settings.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirect_policy)
            .build()?;

        Ok(Self { client, settings })
    }

    async fn fetch_body(&self, url: &str) -> Result<(u16, String)> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(BriefError::Fetch {
                status: Some(status.as_u16()),
                reason: format!(
                    "HTTP {}: {}",
                    status,
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        Ok((status.as_u16(), response.text().await?))
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, feed: &FeedDescriptor, limit: usize) -> Result<FetchedFeed> {
        debug!("Fetching feed: {} ({})", feed.name, feed.url);

        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_secs(self.settings.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.settings.retry_delay_seconds),
            max_interval: Duration::from_secs(self.settings.retry_delay_seconds * 16),
            multiplier: 2.0,
            max_elapsed_time: Some(Duration::from_secs(self.settings.retry_delay_seconds * 60)),
            ..Default::default()
        };

        let mut last_error = None;

        for attempt in 0..=self.settings.max_retries {
            match self.fetch_body(&feed.url).await {
                Ok((status, body)) => {
                    let items = parser::parse_items(&body, limit)?;
                    debug!("Got {} items from {}", items.len(), feed.name);
                    return Ok(FetchedFeed {
                        items,
                        http_status: Some(status),
                    });
                }
                Err(e) => {
                    if attempt < self.settings.max_retries {
                        if let Some(delay) = backoff.next_backoff() {
                            warn!(
                                "Attempt {} failed for {}: {}, retrying in {:?}",
                                attempt + 1,
                                feed.url,
                                e,
                                delay
                            );
                            last_error = Some(e);
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| BriefError::Fetch {
            status: None,
            reason: format!("no response from {}", feed.url),
        }))
    }
}
