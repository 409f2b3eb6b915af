use chrono::{DateTime, Utc};

use super::types::{AppMetadata, KeywordSnapshot, RawSignalSet, TrafficSignalSet};
use crate::scoring::matching::tokenize;
use crate::scoring::ScoringError;

/// Midpoint of a store's install bucket.
pub fn average_installs(min_installs: u64, max_installs: u64) -> f64 {
    (min_installs as f64 + max_installs as f64) / 2.0
}

/// Whole days since `updated`, floored at zero for timestamps in the future.
pub fn app_age_days(updated: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - updated).num_days().max(0) as f64
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    values.sum::<f64>() / n as f64
}

fn require_apps(snapshot: &KeywordSnapshot) -> Result<&[AppMetadata], ScoringError> {
    if snapshot.apps.is_empty() {
        return Err(ScoringError::invalid_input(format!(
            "no apps fetched for keyword '{}'",
            snapshot.keyword
        )));
    }
    Ok(&snapshot.apps)
}

fn mean_installs(apps: &[AppMetadata]) -> f64 {
    mean(apps.iter().map(|a| average_installs(a.min_installs, a.max_installs)))
}

impl RawSignalSet {
    /// Average the fetched apps into difficulty inputs, measuring app age
    /// against `now`.
    pub fn from_snapshot(snapshot: &KeywordSnapshot, now: DateTime<Utc>) -> Result<Self, ScoringError> {
        let apps = require_apps(snapshot)?;

        let signals = Self {
            titles: apps.iter().map(|a| a.title.clone()).collect(),
            keyword: snapshot.keyword.clone(),
            competitors_count: snapshot.competitors_count.unwrap_or(apps.len() as u32),
            average_installs: mean_installs(apps),
            average_rating: mean(apps.iter().map(|a| a.rating)),
            average_age_days: mean(apps.iter().map(|a| app_age_days(a.updated, now))),
        };
        tracing::debug!(keyword = %signals.keyword, ?signals, "difficulty signals extracted");
        Ok(signals)
    }
}

impl TrafficSignalSet {
    /// Traffic inputs for one keyword. `rank_window` is the depth an
    /// unranked `"30+"` result resolves to.
    pub fn from_snapshot(snapshot: &KeywordSnapshot, rank_window: u32) -> Result<Self, ScoringError> {
        let apps = require_apps(snapshot)?;
        let suggest_score = snapshot.suggest_score.ok_or_else(|| {
            ScoringError::invalid_input(format!("missing suggest_score for '{}'", snapshot.keyword))
        })?;
        let rank = snapshot.rank.as_ref().ok_or_else(|| {
            ScoringError::invalid_input(format!("missing rank for '{}'", snapshot.keyword))
        })?;
        let ranked_score = rank.resolve(rank_window).ok_or_else(|| {
            ScoringError::invalid_input(format!(
                "unusable rank {:?} for '{}'",
                rank, snapshot.keyword
            ))
        })?;

        let signals = Self {
            suggest_score,
            ranked_score,
            average_installs: mean_installs(apps),
            keyword_length: tokenize(&snapshot.keyword).len() as u32,
        };
        tracing::debug!(keyword = %snapshot.keyword, ?signals, "traffic signals extracted");
        Ok(signals)
    }
}
