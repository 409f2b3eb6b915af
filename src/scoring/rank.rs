use super::error::ScoringError;
use super::normalize::inverse_normalize;

/// Linear rank decay over a fixed window of search positions.
///
/// Rank 1 scores 1.0, rank `window` (and anything deeper) scores 0.0, and
/// ranks in between fall off linearly. Ranks better than 1 saturate at 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankDecay {
    window: f64,
}

impl RankDecay {
    /// Depth at which rank checks stop reporting positions ("30+").
    pub const DEFAULT_WINDOW: u32 = 30;

    pub fn new(window: u32) -> Result<Self, ScoringError> {
        if window <= 1 {
            return Err(ScoringError::InvalidRange {
                min: 1.0,
                max: window as f64,
            });
        }
        Ok(Self {
            window: window as f64,
        })
    }

    pub fn window(&self) -> u32 {
        self.window as u32
    }

    /// Score a rank position. Non-increasing in `rank`, bounded to `[0, 1]`.
    pub fn ranked_apps_score(&self, rank: f64) -> Result<f64, ScoringError> {
        inverse_normalize(rank, 1.0, self.window)
    }
}

impl Default for RankDecay {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW as f64,
        }
    }
}
