//! isbn_confirm - turn noisy barcode reads into a confirmed ISBN
//!
//! A barcode decoder running on a live camera feed reports one read per
//! frame. Single frames are often wrong: blurred, partially occluded or
//! simply misdecoded into a plausible-looking 13-digit number. This crate
//! filters those reads and only reports an ISBN once several consecutive,
//! independently quality-gated reads agree on it.
//!
//! ```
//! use isbn_confirm::{ConfirmationEngine, RawCandidate};
//!
//! let mut engine = ConfirmationEngine::new();
//! let reads = [0.2, 0.3, 0.1].map(|e| RawCandidate::with_errors("9780306406157", &[e]));
//!
//! assert!(engine.evaluate(&reads[0]).is_none());
//! assert!(engine.evaluate(&reads[1]).is_none());
//! let event = engine.evaluate(&reads[2]).unwrap();
//! assert_eq!(event.payload(), "9780306406157");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Read gating, streak tracking and the confirmation latch
pub mod engine;
/// Errors for config and trace files
pub mod error;
/// Core data structures (RawCandidate, Isbn, ConfirmationEvent)
pub mod models;
/// Scanner start/stop lifecycle around an engine
pub mod session;
/// Trace loading and replay helpers
pub mod tools;

pub use engine::{ConfirmationEngine, EngineConfig, Outcome, QualityScore, Rejection};
pub use error::{ConfigError, TraceError};
pub use models::{ConfirmationEvent, Isbn, LineError, RawCandidate};
pub use session::{ConfirmationSink, EventLog, Session};

/// Evaluate a whole sequence of reads as one session with default thresholds.
///
/// Returns the confirmation, if any read produced one.
pub fn confirm<'a, I>(candidates: I) -> Option<ConfirmationEvent>
where
    I: IntoIterator<Item = &'a RawCandidate>,
{
    let mut engine = ConfirmationEngine::new();
    candidates
        .into_iter()
        .find_map(|candidate| engine.evaluate(candidate))
}
