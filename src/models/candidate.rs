use serde::{Deserialize, Deserializer, Serialize};

/// Per-line decode error reported by the barcode decoder.
///
/// Lower is better. Entries that are absent or not numeric are kept as
/// [`LineError::Missing`] and ignored when scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "Option<f64>")]
pub enum LineError {
    /// Numeric error reading for one scanned line
    Measured(f64),
    /// Absent or non-numeric reading
    Missing,
}

impl LineError {
    /// Numeric value, if this entry carries a usable reading
    pub fn value(&self) -> Option<f64> {
        match *self {
            LineError::Measured(v) if !v.is_nan() => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for LineError {
    fn from(value: f64) -> Self {
        LineError::Measured(value)
    }
}

impl From<Option<f64>> for LineError {
    fn from(value: Option<f64>) -> Self {
        value.map_or(LineError::Missing, LineError::Measured)
    }
}

impl From<serde_json::Value> for LineError {
    fn from(value: serde_json::Value) -> Self {
        match value.as_f64() {
            Some(v) => LineError::Measured(v),
            None => LineError::Missing,
        }
    }
}

impl From<LineError> for Option<f64> {
    fn from(value: LineError) -> Self {
        value.value()
    }
}

/// One decode attempt handed over by the external barcode decoder.
///
/// Candidates arrive one per processed frame and are discarded after
/// evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawCandidate {
    /// Decoded symbol content; empty when the decoder produced none
    #[serde(default, alias = "code", deserialize_with = "null_as_empty")]
    pub payload: String,
    /// Symbology tag reported by the decoder (e.g. `ean_13`), may be empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub format: String,
    /// Decode error for each scanned line, in decoder order
    #[serde(default, alias = "errors")]
    pub line_errors: Vec<LineError>,
}

impl RawCandidate {
    /// Create a candidate with an empty format tag
    pub fn new(payload: impl Into<String>, line_errors: Vec<LineError>) -> Self {
        Self {
            payload: payload.into(),
            format: String::new(),
            line_errors,
        }
    }

    /// Create a candidate whose lines all carry numeric readings
    pub fn with_errors(payload: impl Into<String>, errors: &[f64]) -> Self {
        Self::new(payload, errors.iter().copied().map(LineError::from).collect())
    }

    /// Set the symbology tag
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Payload, or `None` when the decoder produced nothing to compare
    pub fn payload(&self) -> Option<&str> {
        if self.payload.is_empty() {
            None
        } else {
            Some(&self.payload)
        }
    }
}

// Decoders may report purely numeric codes as JSON numbers
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
