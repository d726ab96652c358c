use clap::Parser;
use daily_brief::{BriefConfig, BriefPipeline, FeedCache, HttpFeedSource, SystemClock};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "daily-brief",
    about = "Fetch, dedupe, and rank RSS items into a candidate list"
)]
struct Cli {
    /// Path to the feeds configuration file
    #[arg(long, default_value = "config/feeds.toml")]
    config: PathBuf,

    /// Path to the feed cache file
    #[arg(long, default_value = "output/cache.json")]
    cache: PathBuf,

    /// Write the candidate list to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Ignore cached fetch results for this run
    #[arg(long)]
    no_cache: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    info!("Starting daily-brief pipeline");

    let mut config = BriefConfig::load(&cli.config).map_err(|e| {
        error!(
            "Failed to load configuration from {}: {}",
            cli.config.display(),
            e
        );
        e
    })?;

    if cli.no_cache {
        config.settings.use_cache = false;
    }

    let cache = FeedCache::load(&cli.cache);
    let source = HttpFeedSource::new(config.settings.fetch.clone())?;

    let mut pipeline = BriefPipeline::new(config, cache, Box::new(source), Box::new(SystemClock))?;
    let candidates = pipeline.run().await?;

    info!("Pipeline produced {} candidate items", candidates.items.len());

    let json = serde_json::to_string_pretty(&candidates)?;
    match cli.output {
        Some(path) => {
            fs::write(&path, &json)?;
            info!("Candidate list written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
