use super::error::ScoringError;

fn ensure_finite(what: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::NonFinite { what, value })
    }
}

/// Map `value` from `[min, max]` onto `[0, 1]`, saturating outside the range.
///
/// With `inverse` set the result is `1 - raw`, so that larger inputs score lower.
///
/// # Errors
///
/// Returns `InvalidRange` when `min == max`, and `NonFinite` when any
/// argument is NaN or infinite.
pub fn normalize(value: f64, min: f64, max: f64, inverse: bool) -> Result<f64, ScoringError> {
    let value = ensure_finite("value", value)?;
    let min = ensure_finite("min", min)?;
    let max = ensure_finite("max", max)?;
    if min == max {
        return Err(ScoringError::InvalidRange { min, max });
    }

    let raw = ((value - min) / (max - min)).clamp(0.0, 1.0);
    Ok(if inverse { 1.0 - raw } else { raw })
}

/// `clamp((max - value) / (max - min), 0, 1)`.
///
/// Same result as `normalize(value, min, max, true)`; used where "more" is
/// always worse and a flag would only add noise at the call site.
pub fn inverse_normalize(value: f64, min: f64, max: f64) -> Result<f64, ScoringError> {
    let value = ensure_finite("value", value)?;
    let min = ensure_finite("min", min)?;
    let max = ensure_finite("max", max)?;
    if min == max {
        return Err(ScoringError::InvalidRange { min, max });
    }

    Ok(((max - value) / (max - min)).clamp(0.0, 1.0))
}
