/// Structural gate for ISBN payloads
use super::config::EngineConfig;
use crate::models::{Isbn, RawCandidate};

/// Digits in an EAN-13 symbol
pub const ISBN13_LEN: usize = 13;

/// Check `^97[89]\d{10}$` against a payload.
///
/// Only ASCII digits count; other Unicode digits are rejected.
pub fn matches_isbn13(payload: &str) -> bool {
    let bytes = payload.as_bytes();
    bytes.len() == ISBN13_LEN
        && bytes.starts_with(b"97")
        && matches!(bytes[2], b'8' | b'9')
        && bytes.iter().all(u8::is_ascii_digit)
}

/// Why a candidate failed the structural gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatReject {
    /// Payload is not a 978/979-prefixed 13-digit string
    Pattern,
    /// Decoder tagged the read with a different symbology
    Symbology,
    /// EAN-13 check digit does not match (only when required)
    CheckDigit,
}

/// Structural gate configured from an [`EngineConfig`]
#[derive(Debug, Clone)]
pub struct FormatGate {
    required_format: Option<String>,
    require_check_digit: bool,
}

impl FormatGate {
    /// Build the gate from the engine tuning
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            required_format: config.required_format.clone(),
            require_check_digit: config.require_check_digit,
        }
    }

    /// Parse the candidate's payload into an ISBN or report why not
    pub fn check(&self, candidate: &RawCandidate) -> Result<Isbn, FormatReject> {
        if let Some(required) = &self.required_format {
            if !candidate.format.is_empty() && !candidate.format.eq_ignore_ascii_case(required) {
                return Err(FormatReject::Symbology);
            }
        }

        let isbn = Isbn::parse(&candidate.payload).ok_or(FormatReject::Pattern)?;
        if self.require_check_digit && !isbn.has_valid_check_digit() {
            return Err(FormatReject::CheckDigit);
        }
        Ok(isbn)
    }
}
