use std::collections::BTreeMap;
use std::io::IsTerminal;

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{Score, ScoreResult};
use crate::signals::Competitor;

/// A keyword with its calculated score for display
pub struct ScoredKeyword<'a> {
    pub keyword: &'a str,
    pub result: &'a ScoreResult,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with exactly two decimals ("0.83")
pub fn format_score(score: Score) -> String {
    score.to_string()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format one table row. `index` is 1-based.
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column: 4 chars ("0.83")
pub fn format_scored_line(index: usize, scored: &ScoredKeyword, use_colors: bool) -> String {
    scored_line(index, scored, get_terminal_width(), use_colors)
}

fn scored_line(index: usize, scored: &ScoredKeyword, term_width: Option<usize>, use_colors: bool) -> String {
    let fixed_width = 3 + 1 + 4 + 2;
    let index_str = format!("{:>2}.", index);
    let score_str = format_score(scored.result.score);

    let keyword = match term_width {
        Some(width) if width > fixed_width + 10 => truncate(scored.keyword, width - fixed_width),
        // Very narrow terminal
        Some(_) => truncate(scored.keyword, 20),
        None => scored.keyword.to_string(),
    };

    if use_colors {
        format!("{} {}  {}", index_str.dimmed(), score_str.bold(), keyword)
    } else {
        format!("{} {}  {}", index_str, score_str, keyword)
    }
}

/// Format keywords as a table with columns: Index, Score, Keyword
/// No headers
pub fn format_scored_table(keywords: &[ScoredKeyword], use_colors: bool) -> String {
    if keywords.is_empty() {
        return "No keywords scored.".to_string();
    }

    let term_width = get_terminal_width();
    keywords
        .iter()
        .enumerate()
        .map(|(idx, scored)| scored_line(idx + 1, scored, term_width, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-component breakdown, one indented line per component:
/// "    installs     0.50 x 0.20"
pub fn format_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    result
        .components
        .iter()
        .map(|c| {
            let name = format!("{:<12}", c.name);
            let value = format!("{:.2}", c.score);
            if use_colors {
                format!("    {} {} x {:.2}", name.cyan(), value, c.weight)
            } else {
                format!("    {} {} x {:.2}", name, value, c.weight)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format keywords as tab-separated values for scripting
/// Columns: score, keyword (no headers, no colors)
pub fn format_tsv(keywords: &[ScoredKeyword]) -> String {
    keywords
        .iter()
        .map(|scored| format!("{}\t{}", format_score(scored.result.score), scored.keyword))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonRow<'a> {
    keyword: &'a str,
    score: Score,
    components: BTreeMap<&'static str, f64>,
}

/// Format keywords as a pretty-printed JSON array
pub fn format_json(keywords: &[ScoredKeyword]) -> Result<String> {
    let rows: Vec<JsonRow> = keywords
        .iter()
        .map(|scored| JsonRow {
            keyword: scored.keyword,
            score: scored.result.score,
            components: scored
                .result
                .components
                .iter()
                .map(|c| (c.name, c.score))
                .collect(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn competitor_positions(competitor: &Competitor) -> String {
    competitor
        .positions
        .iter()
        .map(|(keyword, position)| format!("{} #{}", keyword, position))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format competitors as a table with columns: Index, Keyword count, App id,
/// Positions. No headers
pub fn format_competitor_table(competitors: &[Competitor], use_colors: bool) -> String {
    if competitors.is_empty() {
        return "No competitors found.".to_string();
    }

    competitors
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            let index_str = format!("{:>2}.", idx + 1);
            let count_str = format!("{:>3}", c.keyword_count);
            let positions = competitor_positions(c);
            if use_colors {
                format!("{} {}  {}  {}", index_str.dimmed(), count_str.bold(), c.app_id, positions.dimmed())
            } else {
                format!("{} {}  {}  {}", index_str, count_str, c.app_id, positions)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Columns: keyword count, app id (no headers, no colors)
pub fn format_competitor_tsv(competitors: &[Competitor]) -> String {
    competitors
        .iter()
        .map(|c| format!("{}\t{}", c.keyword_count, c.app_id))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_competitor_json(competitors: &[Competitor]) -> Result<String> {
    Ok(serde_json::to_string_pretty(competitors)?)
}
