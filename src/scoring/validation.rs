use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Length 1 would collapse the length range to a point
    if let Some(len) = config.max_keyword_length {
        if len < 2 {
            errors.push(format!(
                "scoring.max_keyword_length: must be at least 2, got {}",
                len
            ));
        }
    }

    if let Some(window) = config.rank_window {
        if window < 2 {
            errors.push(format!("scoring.rank_window: must be at least 2, got {}", window));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
