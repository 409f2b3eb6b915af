use super::error::ScoringError;

/// How well an app title matches a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Title words are exactly the keyword words, in order
    Exact,
    /// Every keyword word appears somewhere in the title
    Broad,
    /// At least one keyword word appears in the title
    Partial,
    None,
}

impl MatchKind {
    /// Classify a title against already tokenized keyword words.
    ///
    /// Checks run exact, broad, partial, in that order; the first hit wins.
    pub fn classify(title: &str, keyword_words: &[String]) -> Self {
        let title_words = tokenize(title);

        if title_words == keyword_words {
            MatchKind::Exact
        } else if keyword_words.iter().all(|w| title_words.contains(w)) {
            MatchKind::Broad
        } else if keyword_words.iter().any(|w| title_words.contains(w)) {
            MatchKind::Partial
        } else {
            MatchKind::None
        }
    }

    pub fn score(self) -> f64 {
        match self {
            MatchKind::Exact => 1.0,
            MatchKind::Broad => 0.75,
            MatchKind::Partial => 0.5,
            MatchKind::None => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Broad => "broad",
            MatchKind::Partial => "partial",
            MatchKind::None => "none",
        }
    }
}

/// Lowercase and split on any run of whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Mean match score of `titles` against `keyword`, in `[0, 1]`.
///
/// # Errors
///
/// `InvalidInput` if `titles` is empty or `keyword` has no words.
pub fn title_match_score<S: AsRef<str>>(titles: &[S], keyword: &str) -> Result<f64, ScoringError> {
    if titles.is_empty() {
        return Err(ScoringError::invalid_input("titles must not be empty"));
    }
    let keyword_words = tokenize(keyword);
    if keyword_words.is_empty() {
        return Err(ScoringError::invalid_input("keyword must contain at least one word"));
    }

    let total: f64 = titles
        .iter()
        .map(|title| {
            let kind = MatchKind::classify(title.as_ref(), &keyword_words);
            tracing::trace!(title = title.as_ref(), kind = kind.label(), "title match");
            kind.score()
        })
        .sum();

    Ok(total / titles.len() as f64)
}
