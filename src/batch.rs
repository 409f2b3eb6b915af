use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::scoring::matching::tokenize;
use crate::scoring::{calculate_difficulty_score, ScoreResult, ScoringError, TrafficAggregator};
use crate::signals::{KeywordSnapshot, RawSignalSet, TrafficSignalSet};

/// Snapshot file produced by the fetch layer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ScoringInput {
    pub keywords: Vec<KeywordSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    Difficulty,
    Traffic,
}

/// Read a snapshot file. `.yaml`/`.yml` parse as YAML, anything else as JSON.
pub fn load_input(path: &Path) -> Result<ScoringInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file at {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let input: ScoringInput = if is_yaml {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse input: invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse input: invalid JSON in {}", path.display()))?
    };

    tracing::debug!(path = %path.display(), keywords = input.keywords.len(), "loaded input");
    Ok(input)
}

/// Per-keyword outcome of a batch run.
pub struct BatchOutcome {
    /// Sorted by score descending, then keyword ascending
    pub scored: Vec<(String, ScoreResult)>,
    pub failed: Vec<(String, ScoringError)>,
}

/// Score every snapshot independently. A failing snapshot is reported in
/// `failed` and does not stop the rest.
///
/// Keywords are deduplicated on their lowercased words, so case and spacing
/// differences collapse; the first occurrence wins.
pub fn score_batch(
    input: &ScoringInput,
    kind: ScoreKind,
    aggregator: &TrafficAggregator,
    now: DateTime<Utc>,
) -> BatchOutcome {
    let mut seen = HashSet::new();
    let unique: Vec<&KeywordSnapshot> = input
        .keywords
        .iter()
        .filter(|snap| seen.insert(tokenize(&snap.keyword).join(" ")))
        .collect();

    if unique.len() < input.keywords.len() {
        tracing::debug!(
            dropped = input.keywords.len() - unique.len(),
            "dropped duplicate keywords"
        );
    }

    let mut scored = Vec::new();
    let mut failed = Vec::new();

    for snap in unique {
        let result = match kind {
            ScoreKind::Difficulty => RawSignalSet::from_snapshot(snap, now)
                .and_then(|signals| calculate_difficulty_score(&signals)),
            ScoreKind::Traffic => TrafficSignalSet::from_snapshot(snap, aggregator.rank_window())
                .and_then(|signals| aggregator.calculate_traffic_score(&signals)),
        };
        match result {
            Ok(result) => scored.push((snap.keyword.clone(), result)),
            Err(e) => {
                tracing::warn!(keyword = %snap.keyword, error = %e, "keyword not scored");
                failed.push((snap.keyword.clone(), e));
            }
        }
    }

    scored.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    BatchOutcome { scored, failed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::AppMetadata;
    use chrono::{Duration, TimeZone};
    use std::io::Write;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn snapshot(keyword: &str, installs: u64, apps: usize) -> KeywordSnapshot {
        KeywordSnapshot {
            keyword: keyword.to_string(),
            competitors_count: None,
            apps: (0..apps)
                .map(|i| AppMetadata {
                    app_id: None,
                    title: format!("{} {}", keyword, i),
                    min_installs: installs,
                    max_installs: installs,
                    rating: 4.0,
                    updated: now() - Duration::days(90),
                })
                .collect(),
            suggest_score: Some(3.0),
            rank: Some(5.0.into()),
        }
    }

    #[test]
    fn test_batch_sorts_by_score_descending() {
        let input = ScoringInput {
            keywords: vec![
                snapshot("quiet app", 2_000, 3),
                snapshot("busy app", 900_000, 3),
            ],
        };
        let outcome = score_batch(&input, ScoreKind::Difficulty, &TrafficAggregator::default(), now());
        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.scored[0].0, "busy app");
        assert_eq!(outcome.scored[1].0, "quiet app");
        assert!(outcome.scored[0].1.score >= outcome.scored[1].1.score);
    }

    #[test]
    fn test_batch_ties_break_on_keyword() {
        let input = ScoringInput {
            keywords: vec![snapshot("zeta", 50_000, 2), snapshot("alpha", 50_000, 2)],
        };
        let outcome = score_batch(&input, ScoreKind::Traffic, &TrafficAggregator::default(), now());
        // Both keywords are one word with identical inputs
        assert_eq!(outcome.scored[0].0, "alpha");
        assert_eq!(outcome.scored[1].0, "zeta");
    }

    #[test]
    fn test_batch_collects_failures_and_continues() {
        let input = ScoringInput {
            keywords: vec![snapshot("empty", 1_000, 0), snapshot("photo editor", 10_000, 2)],
        };
        let outcome = score_batch(&input, ScoreKind::Difficulty, &TrafficAggregator::default(), now());
        assert_eq!(outcome.scored.len(), 1);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, "empty");
        assert!(matches!(outcome.failed[0].1, ScoringError::InvalidInput(_)));
    }

    #[test]
    fn test_batch_deduplicates_keywords() {
        let input = ScoringInput {
            keywords: vec![snapshot("Photo Editor", 10_000, 2), snapshot("photo editor ", 99_000, 2)],
        };
        let outcome = score_batch(&input, ScoreKind::Difficulty, &TrafficAggregator::default(), now());
        assert_eq!(outcome.scored.len(), 1);
        assert_eq!(outcome.scored[0].0, "Photo Editor");
    }

    #[test]
    fn test_batch_deduplicates_on_words() {
        let input = ScoringInput {
            keywords: vec![snapshot("photo editor", 10_000, 2), snapshot("photo  editor", 99_000, 2)],
        };
        let outcome = score_batch(&input, ScoreKind::Traffic, &TrafficAggregator::default(), now());
        assert_eq!(outcome.scored.len(), 1);
        assert_eq!(outcome.scored[0].0, "photo editor");
    }

    #[test]
    fn test_load_mixed_rank_file_scores_each_keyword() {
        let app = r#"{"title": "Photo Editor", "minInstalls": 1000, "maxInstalls": 5000, "score": 4.2, "updated": "2024-05-01T00:00:00Z"}"#;
        let json = format!(
            r#"{{"keywords": [
                {{"keyword": "photo editor", "apps": [{app}], "suggest_score": 4.0, "rank": 3}},
                {{"keyword": "collage maker", "apps": [{app}], "suggest_score": 4.0, "rank": "30+"}},
                {{"keyword": "video editor", "apps": [{app}], "suggest_score": 4.0, "rank": "Error"}}
            ]}}"#
        );
        let path = std::env::temp_dir().join(format!("aso-score-mixed-{}.json", std::process::id()));
        fs::write(&path, json).unwrap();
        let input = load_input(&path).unwrap();
        fs::remove_file(&path).ok();

        let outcome = score_batch(&input, ScoreKind::Traffic, &TrafficAggregator::default(), now());
        assert_eq!(outcome.scored.len(), 2);
        assert_eq!(outcome.scored[0].0, "photo editor");
        let unranked = &outcome.scored[1];
        assert_eq!(unranked.0, "collage maker");
        assert_eq!(unranked.1.components[1].score, 0.0);

        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, "video editor");
        assert!(matches!(outcome.failed[0].1, ScoringError::InvalidInput(_)));
    }

    #[test]
    fn test_load_json_and_yaml_input() {
        let input = ScoringInput {
            keywords: vec![snapshot("photo editor", 10_000, 1)],
        };
        let dir = std::env::temp_dir();

        let json_path = dir.join(format!("aso-score-input-{}.json", std::process::id()));
        let mut file = fs::File::create(&json_path).unwrap();
        file.write_all(serde_json::to_string(&input).unwrap().as_bytes()).unwrap();
        let from_json = load_input(&json_path).unwrap();
        fs::remove_file(&json_path).ok();
        assert_eq!(from_json, input);

        let yaml_path = dir.join(format!("aso-score-input-{}.yaml", std::process::id()));
        let mut file = fs::File::create(&yaml_path).unwrap();
        file.write_all(serde_saphyr::to_string(&input).unwrap().as_bytes()).unwrap();
        let from_yaml = load_input(&yaml_path).unwrap();
        fs::remove_file(&yaml_path).ok();
        assert_eq!(from_yaml.keywords[0].keyword, "photo editor");
        assert_eq!(from_yaml.keywords[0].apps.len(), 1);
    }

    #[test]
    fn test_load_missing_input_is_error() {
        let err = load_input(Path::new("/nonexistent/aso-input.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
