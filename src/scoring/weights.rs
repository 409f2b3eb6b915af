use super::error::ScoringError;

/// Named component weights for one aggregator.
///
/// Weights are non-negative and sum to 1.0, so a weighted sum of component
/// scores in `[0, 1]` stays in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightTable<const N: usize> {
    entries: [(&'static str, f64); N],
}

const SUM_TOLERANCE: f64 = 1e-9;

impl<const N: usize> WeightTable<N> {
    /// Build a table, rejecting negative weights or a total other than 1.0.
    #[cfg(test)]
    pub(crate) fn new(entries: [(&'static str, f64); N]) -> Result<Self, ScoringError> {
        let table = Self { entries };
        table.check()?;
        Ok(table)
    }

    /// Unchecked constructor for the compile-time tables below. Every
    /// aggregation re-checks its table in debug builds.
    pub(crate) const fn fixed(entries: [(&'static str, f64); N]) -> Self {
        Self { entries }
    }

    pub fn check(&self) -> Result<(), ScoringError> {
        if let Some((name, w)) = self.entries.iter().find(|(_, w)| w.is_nan() || *w < 0.0) {
            return Err(ScoringError::invalid_input(format!(
                "weight '{}' must be non-negative, got {}",
                name, w
            )));
        }
        let total = self.total();
        if (total - 1.0).abs() > SUM_TOLERANCE {
            return Err(ScoringError::invalid_input(format!(
                "weights must sum to 1.0, got {}",
                total
            )));
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, w)| *w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }
}

pub const TITLE_MATCH: &str = "title_match";
pub const COMPETITORS: &str = "competitors";
pub const INSTALLS: &str = "installs";
pub const RATING: &str = "rating";
pub const AGE: &str = "age";
pub const SUGGEST: &str = "suggest";
pub const RANKED: &str = "ranked";
pub const LENGTH: &str = "length";

pub const DIFFICULTY_WEIGHTS: WeightTable<5> = WeightTable::fixed([
    (TITLE_MATCH, 0.20),
    (COMPETITORS, 0.25),
    (INSTALLS, 0.20),
    (RATING, 0.15),
    (AGE, 0.20),
]);

pub const TRAFFIC_WEIGHTS: WeightTable<4> = WeightTable::fixed([
    (SUGGEST, 0.30),
    (RANKED, 0.35),
    (INSTALLS, 0.20),
    (LENGTH, 0.15),
]);
