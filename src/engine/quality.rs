use crate::models::LineError;
use serde::Serialize;
use std::fmt;

/// Mean decode error over the numeric line readings of one candidate.
///
/// Infinite when no line carried a numeric reading, which never passes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct QualityScore(f64);

impl QualityScore {
    /// Score used when there is no usable reading
    pub const UNUSABLE: QualityScore = QualityScore(f64::INFINITY);

    /// Average the numeric entries, skipping absent and NaN readings
    pub fn from_line_errors(errors: &[LineError]) -> Self {
        let (sum, count) = errors
            .iter()
            .filter_map(LineError::value)
            .fold((0.0f64, 0usize), |(sum, count), v| (sum + v, count + 1));

        if count == 0 {
            Self::UNUSABLE
        } else {
            QualityScore(sum / count as f64)
        }
    }

    /// Raw mean
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether any numeric reading contributed
    pub fn is_usable(&self) -> bool {
        self.0.is_finite()
    }

    /// Finite and at most `threshold`
    pub fn passes(&self, threshold: f64) -> bool {
        self.is_usable() && self.0 <= threshold
    }
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_usable() {
            write!(f, "{:.3}", self.0)
        } else {
            f.write_str("inf")
        }
    }
}
