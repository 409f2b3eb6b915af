pub mod config;
pub mod engine;
pub mod error;
pub mod matching;
pub mod normalize;
pub mod rank;
pub mod validation;
pub mod weights;

pub use config::*;
pub use engine::{calculate_difficulty_score, ComponentContribution, Score, ScoreResult, TrafficAggregator};
pub use error::ScoringError;
pub use matching::{title_match_score, MatchKind};
pub use normalize::{inverse_normalize, normalize};
pub use rank::RankDecay;
pub use validation::validate_scoring;
pub use weights::{WeightTable, DIFFICULTY_WEIGHTS, TRAFFIC_WEIGHTS};
