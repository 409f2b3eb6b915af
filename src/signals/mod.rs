pub mod competitors;
pub mod extract;
pub mod types;

pub use competitors::{top_competitors, Competitor, TOP_COMPETITORS};
pub use extract::{app_age_days, average_installs};
pub use types::{AppMetadata, KeywordSnapshot, RankPosition, RawSignalSet, TrafficSignalSet};
