pub mod formatter;

pub use formatter::{
    format_breakdown, format_competitor_json, format_competitor_table, format_competitor_tsv, format_json,
    format_score, format_scored_line, format_scored_table, format_tsv, should_use_colors, ScoredKeyword,
};
