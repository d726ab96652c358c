use crate::types::CanonicalItem;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Tunable scoring knobs. Ranking only orders items, it never decides
/// eligibility.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the recency term `recency_weight / (1 + age_hours)`.
    pub recency_weight: f64,
    /// Case-insensitive keywords matched against the title, each adding
    /// its weight to the score.
    pub keywords: BTreeMap<String, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let mut keywords = BTreeMap::new();
        for keyword in [
            "AI",
            "GPT",
            "LLM",
            "breakthrough",
            "release",
            "launch",
            "announced",
        ] {
            keywords.insert(keyword.to_string(), 2.0);
        }

        Self {
            recency_weight: 1.0,
            keywords,
        }
    }
}

/// Pure relevance score: a recency base decaying with age plus the
/// configured keyword bonuses found in the title.
pub fn score(item: &CanonicalItem, config: &ScoringConfig, now: DateTime<Utc>) -> f64 {
    let age_hours = now.signed_duration_since(item.published).num_seconds().max(0) as f64 / 3600.0;
    let mut score = config.recency_weight / (1.0 + age_hours);

    let title = item.title.to_lowercase();
    for (keyword, weight) in &config.keywords {
        if title.contains(&keyword.to_lowercase()) {
            score += weight;
        }
    }

    score
}

/// Order by descending score and truncate to `max_count`. The sort is
/// stable, so equal scores keep their input order and identical inputs
/// always produce identical output.
pub fn rank(
    mut items: Vec<CanonicalItem>,
    config: &ScoringConfig,
    max_count: usize,
    now: DateTime<Utc>,
) -> Vec<CanonicalItem> {
    for item in &mut items {
        item.score = score(item, config, now);
    }

    items.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    items.truncate(max_count);

    items
}
