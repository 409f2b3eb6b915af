use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one app as returned by the store fetch layer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AppMetadata {
    /// Store identifier (package name or numeric id)
    #[serde(default, alias = "appId")]
    pub app_id: Option<String>,
    pub title: String,
    #[serde(alias = "minInstalls")]
    pub min_installs: u64,
    #[serde(alias = "maxInstalls")]
    pub max_installs: u64,
    #[serde(alias = "score")]
    pub rating: f64,            // Store rating, 1-5
    pub updated: DateTime<Utc>, // Last store update
}

/// Everything fetched for one keyword: the apps ranking for it plus the
/// optional traffic inputs.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct KeywordSnapshot {
    pub keyword: String,
    /// Distinct apps ranking for the keyword. Defaults to `apps.len()`.
    #[serde(default)]
    pub competitors_count: Option<u32>,
    pub apps: Vec<AppMetadata>,
    /// Search-suggestion relevance on a 0-10 scale
    #[serde(default)]
    pub suggest_score: Option<f64>,
    /// Search position of the app being optimized
    #[serde(default)]
    pub rank: Option<RankPosition>,
}

/// A rank check result: a search position, or a label such as `"30+"` when
/// the app was not found within the checked depth.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RankPosition {
    Position(f64),
    Label(String),
}

impl RankPosition {
    /// Numeric rank to score. A `"<depth>+"` label resolves to `window`, which
    /// scores 0.0. Any other label (e.g. `"Error"`) is `None`.
    pub fn resolve(&self, window: u32) -> Option<f64> {
        match self {
            RankPosition::Position(rank) => Some(*rank),
            RankPosition::Label(label) => {
                let depth = label.trim().strip_suffix('+')?;
                depth.trim().parse::<u32>().ok()?;
                Some(window as f64)
            }
        }
    }
}

impl From<f64> for RankPosition {
    fn from(rank: f64) -> Self {
        RankPosition::Position(rank)
    }
}

/// Inputs for the Difficulty Score.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSignalSet {
    pub titles: Vec<String>,
    pub keyword: String,
    pub competitors_count: u32,
    pub average_installs: f64,
    pub average_rating: f64,
    pub average_age_days: f64,
}

/// Inputs for the Traffic Score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficSignalSet {
    pub suggest_score: f64,
    pub ranked_score: f64,
    pub average_installs: f64,
    /// Keyword length in words
    pub keyword_length: u32,
}
