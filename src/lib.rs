pub mod cache;
pub mod config;
pub mod fetcher;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod ranking;
pub mod selection;
pub mod types;
pub mod utils;

pub use cache::{FeedCache, CACHE_TTL_SECS};
pub use config::{BriefConfig, FetchSettings, Settings};
pub use fetcher::{FeedSource, HttpFeedSource};
pub use pipeline::BriefPipeline;
pub use ranking::ScoringConfig;
pub use types::*;
