use thiserror::Error;

/// Errors raised by the scoring engine.
///
/// All of them are programming or data errors detected at the point of use.
/// The engine never substitutes a default value for malformed input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("invalid range: min ({min}) and max ({max}) must differ")]
    InvalidRange { min: f64, max: f64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{what} is not a finite number: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

impl ScoringError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ScoringError::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_message() {
        let err = ScoringError::InvalidRange { min: 5.0, max: 5.0 };
        assert_eq!(err.to_string(), "invalid range: min (5) and max (5) must differ");
    }

    #[test]
    fn test_invalid_input_message() {
        let err = ScoringError::invalid_input("titles must not be empty");
        assert_eq!(err.to_string(), "invalid input: titles must not be empty");
    }
}
