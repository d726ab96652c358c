use daily_brief::{BriefConfig, BriefError};

const SAMPLE: &str = r#"
[[feeds]]
name = "Hacker News"
url = "https://news.ycombinator.com/rss"
category = "Tech"

[[feeds]]
name = "Research Weekly"
url = "https://example.com/research.xml"
days = ["monday", "thursday"]

[settings]
max_articles_per_feed = 3
max_articles_to_summarize = 10
filter_hours = 24

[settings.scoring]
recency_weight = 2.0

[settings.scoring.keywords]
AI = 2.0
rust = 1.5
"#;

#[test]
fn parses_full_config() {
    let config = BriefConfig::from_toml(SAMPLE).unwrap();

    assert_eq!(config.feeds.len(), 2);
    assert_eq!(config.feeds[0].category, "Tech");
    assert_eq!(config.feeds[0].days, None);
    assert_eq!(config.feeds[1].category, "General");
    assert_eq!(
        config.feeds[1].days,
        Some(vec!["monday".to_string(), "thursday".to_string()])
    );

    assert_eq!(config.settings.max_articles_per_feed, 3);
    assert_eq!(config.settings.max_articles_to_summarize, 10);
    assert_eq!(config.settings.filter_hours, 24);
    assert!(config.settings.use_cache);

    assert_eq!(config.settings.scoring.recency_weight, 2.0);
    assert_eq!(config.settings.scoring.keywords.get("rust"), Some(&1.5));
}

#[test]
fn defaults_apply_without_settings() {
    let config = BriefConfig::from_toml(
        r#"
[[feeds]]
name = "Only Feed"
url = "https://example.com/rss"
"#,
    )
    .unwrap();

    assert_eq!(config.settings.max_articles_per_feed, 5);
    assert_eq!(config.settings.max_articles_to_summarize, 20);
    assert_eq!(config.settings.filter_hours, 48);
    assert_eq!(config.settings.fetch.timeout_seconds, 30);
    assert!(config.settings.scoring.keywords.contains_key("AI"));
}

#[test]
fn rejects_empty_feed_list() {
    let err = BriefConfig::from_toml("feeds = []").unwrap_err();
    assert!(matches!(err, BriefError::Config(_)));
}

#[test]
fn rejects_non_positive_limits() {
    let err = BriefConfig::from_toml(
        r#"
[[feeds]]
name = "Feed"
url = "https://example.com/rss"

[settings]
max_articles_per_feed = 0
"#,
    )
    .unwrap_err();
    assert!(matches!(err, BriefError::Config(_)));
}

#[test]
fn rejects_non_http_feed_url() {
    let err = BriefConfig::from_toml(
        r#"
[[feeds]]
name = "Feed"
url = "ftp://example.com/rss"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, BriefError::Config(_)));
}

#[test]
fn rejects_unnamed_feed() {
    let err = BriefConfig::from_toml(
        r#"
[[feeds]]
name = "  "
url = "https://example.com/rss"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, BriefError::Config(_)));
}

#[test]
fn load_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feeds.toml");
    std::fs::write(&path, SAMPLE).unwrap();

    let config = BriefConfig::load(&path).unwrap();
    assert_eq!(config.feeds.len(), 2);
}
