//! Lenient score coercion for upstream analysis output.
//!
//! The analysis step is an LLM and routinely returns floats, numeric
//! strings or garbage. None of that is an error here: readable numbers are
//! truncated toward zero and clamped, everything else becomes 0.

use super::types::MAX_SCORE;
use serde_json::Value;

/// Clamp an integer into the score range.
pub fn clamp_score(value: i64) -> u8 {
    value.clamp(0, MAX_SCORE as i64) as u8
}

/// Clamp a float into the score range, truncating toward zero.
///
/// Non-finite values coerce to 0.
pub fn clamp_score_f64(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().clamp(0.0, MAX_SCORE as f64) as u8
}

/// Parse free text as a score. Unparsable text gives 0.
pub fn parse_score(text: &str) -> u8 {
    match text.trim().parse::<f64>() {
        Ok(v) => clamp_score_f64(v),
        Err(_) => {
            tracing::trace!(input = text, "unreadable capability score, using 0");
            0
        }
    }
}

/// Coerce an optional JSON value into a score.
pub fn coerce_score(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => clamp_score(i),
            None => n.as_f64().map(clamp_score_f64).unwrap_or(0),
        },
        Some(Value::String(s)) => parse_score(s),
        Some(Value::Bool(b)) => u8::from(*b),
        Some(Value::Null) | None => 0,
        Some(other) => {
            tracing::trace!(value = %other, "non-scalar capability score, using 0");
            0
        }
    }
}
