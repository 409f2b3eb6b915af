use serde::{Deserialize, Serialize};

use super::rank::RankDecay;

/// Default upper bound for keyword length, in words.
pub const DEFAULT_MAX_KEYWORD_LENGTH: u32 = 5;

/// Tunable scoring settings.
///
/// Component weights and normalization ranges are fixed; only the knobs
/// below can be changed.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   max_keyword_length: 5
///   rank_window: 30
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Keyword length (in words) at which the traffic length component hits 0.
    /// Single-word keywords always score 1.0.
    #[serde(default)]
    pub max_keyword_length: Option<u32>,

    /// Search depth over which rank scores decay linearly to 0 (default: 30)
    #[serde(default)]
    pub rank_window: Option<u32>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_keyword_length: Some(DEFAULT_MAX_KEYWORD_LENGTH),
            rank_window: Some(RankDecay::DEFAULT_WINDOW),
        }
    }
}

impl ScoringConfig {
    pub fn max_keyword_length(&self) -> u32 {
        self.max_keyword_length.unwrap_or(DEFAULT_MAX_KEYWORD_LENGTH)
    }

    pub fn rank_window(&self) -> u32 {
        self.rank_window.unwrap_or(RankDecay::DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.max_keyword_length, Some(5));
        assert_eq!(config.rank_window, Some(30));
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = "max_keyword_length: 8\n";
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.max_keyword_length(), 8);
        assert!(config.rank_window.is_none());
        assert_eq!(config.rank_window(), 30);
    }

    #[test]
    fn test_empty_scoring_config_falls_back_to_defaults() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config.max_keyword_length(), DEFAULT_MAX_KEYWORD_LENGTH);
        assert_eq!(config.rank_window(), RankDecay::DEFAULT_WINDOW);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "max_keyword_lenght: 8\n";
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
