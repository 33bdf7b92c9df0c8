//! ISBN confirmation engine
//!
//! This module holds the decision logic applied to every decoder read:
//! - Structural gate (ISBN-13 pattern, optional symbology and check digit)
//! - Quality gate (mean per-line decode error)
//! - Consecutive-match stability tracking and the confirmation latch

/// Engine tuning (thresholds, env and JSON loading)
pub mod config;
/// Orchestrates the gates and the streak into a single decision
pub mod confirmation;
/// ISBN-13 structural pattern
pub mod format;
/// Mean line error scoring
pub mod quality;
pub mod stability;

pub use config::EngineConfig;
pub use confirmation::{ConfirmationEngine, Outcome, Rejection};
pub use format::{FormatGate, FormatReject};
pub use quality::QualityScore;
pub use stability::{Phase, StabilityState};
