use std::fmt;

use serde::Serialize;

use super::config::ScoringConfig;
use super::error::ScoringError;
use super::matching::title_match_score;
use super::normalize::{inverse_normalize, normalize};
use super::rank::RankDecay;
use super::weights::{WeightTable, DIFFICULTY_WEIGHTS, TRAFFIC_WEIGHTS};
use crate::signals::{RawSignalSet, TrafficSignalSet};

// Normalization ranges shared by both aggregators
const INSTALLS_RANGE: (f64, f64) = (1_000.0, 1_000_000.0);
const TITLE_MATCH_RANGE: (f64, f64) = (0.0, 10.0);
const COMPETITORS_RANGE: (f64, f64) = (0.0, 100.0);
const RATING_RANGE: (f64, f64) = (1.0, 5.0);
const AGE_DAYS_RANGE: (f64, f64) = (0.0, 365.0);
const SUGGEST_RANGE: (f64, f64) = (0.0, 10.0);

/// Final score in `[0, 1]`, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Score(f64);

impl Score {
    /// Round to two decimals from the exact binary value of `sum`, so a sum
    /// stored just below a half cent (0.365 is 0.36499...) rounds down.
    fn from_weighted_sum(sum: f64) -> Self {
        Score(format!("{:.2}", sum).parse().unwrap_or(sum))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentContribution {
    pub name: &'static str, // e.g. "title_match", "installs"
    pub score: f64,         // Component score in [0, 1]
    pub weight: f64,
}

impl ComponentContribution {
    pub fn weighted(&self) -> f64 {
        self.score * self.weight
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: Score,
    /// Weighted sum before rounding
    pub raw: f64,
    /// One entry per component, in weight-table order
    pub components: Vec<ComponentContribution>,
}

impl ScoreResult {
    #[cfg(test)]
    pub(crate) fn component(&self, name: &str) -> Option<f64> {
        self.components.iter().find(|c| c.name == name).map(|c| c.score)
    }
}

fn weighted_sum<const N: usize>(weights: &WeightTable<N>, scores: [f64; N]) -> ScoreResult {
    debug_assert!(weights.check().is_ok(), "weight table must sum to 1.0");
    let components: Vec<ComponentContribution> = weights
        .iter()
        .zip(scores)
        .map(|((name, weight), score)| ComponentContribution { name, score, weight })
        .collect();
    let raw: f64 = components.iter().map(ComponentContribution::weighted).sum();

    ScoreResult {
        score: Score::from_weighted_sum(raw),
        raw,
        components,
    }
}

/// Difficulty of ranking for `signals.keyword`, higher is harder.
///
/// # Errors
///
/// `InvalidInput` when `signals.titles` is empty or the keyword is blank.
pub fn calculate_difficulty_score(signals: &RawSignalSet) -> Result<ScoreResult, ScoringError> {
    let title_match = title_match_score(signals.titles.as_slice(), &signals.keyword)?;

    let scores = [
        // The raw match mean is read on a 0-10 scale and inverted
        normalize(title_match, TITLE_MATCH_RANGE.0, TITLE_MATCH_RANGE.1, true)?,
        normalize(
            signals.competitors_count as f64,
            COMPETITORS_RANGE.0,
            COMPETITORS_RANGE.1,
            false,
        )?,
        normalize(signals.average_installs, INSTALLS_RANGE.0, INSTALLS_RANGE.1, false)?,
        normalize(signals.average_rating, RATING_RANGE.0, RATING_RANGE.1, true)?,
        normalize(signals.average_age_days, AGE_DAYS_RANGE.0, AGE_DAYS_RANGE.1, false)?,
    ];

    let result = weighted_sum(&DIFFICULTY_WEIGHTS, scores);
    tracing::debug!(
        keyword = %signals.keyword,
        title_match,
        score = %result.score,
        components = ?result.components,
        "difficulty scored"
    );
    Ok(result)
}

/// Scores keyword traffic potential. Holds the configured keyword-length
/// ceiling and rank decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficAggregator {
    max_keyword_length: u32,
    decay: RankDecay,
}

impl TrafficAggregator {
    pub fn new(config: &ScoringConfig) -> Result<Self, ScoringError> {
        let max_keyword_length = config.max_keyword_length();
        if max_keyword_length <= 1 {
            return Err(ScoringError::InvalidRange {
                min: 1.0,
                max: max_keyword_length as f64,
            });
        }
        Ok(Self {
            max_keyword_length,
            decay: RankDecay::new(config.rank_window())?,
        })
    }

    pub fn max_keyword_length(&self) -> u32 {
        self.max_keyword_length
    }

    pub fn rank_window(&self) -> u32 {
        self.decay.window()
    }

    /// Traffic potential of a keyword, higher means more search volume.
    pub fn calculate_traffic_score(
        &self,
        signals: &TrafficSignalSet,
    ) -> Result<ScoreResult, ScoringError> {
        if signals.keyword_length == 0 {
            return Err(ScoringError::invalid_input("keyword_length must be at least 1"));
        }

        let scores = [
            normalize(signals.suggest_score, SUGGEST_RANGE.0, SUGGEST_RANGE.1, true)?,
            self.decay.ranked_apps_score(signals.ranked_score)?,
            normalize(signals.average_installs, INSTALLS_RANGE.0, INSTALLS_RANGE.1, false)?,
            inverse_normalize(
                signals.keyword_length as f64,
                1.0,
                self.max_keyword_length as f64,
            )?,
        ];

        let result = weighted_sum(&TRAFFIC_WEIGHTS, scores);
        tracing::debug!(
            score = %result.score,
            components = ?result.components,
            "traffic scored"
        );
        Ok(result)
    }
}

impl Default for TrafficAggregator {
    fn default() -> Self {
        Self {
            max_keyword_length: super::config::DEFAULT_MAX_KEYWORD_LENGTH,
            decay: RankDecay::default(),
        }
    }
}
