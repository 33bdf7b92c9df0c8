//! Confirmation engine - gates each read and tracks the streak

use crate::engine::config::EngineConfig;
use crate::engine::format::{FormatGate, FormatReject};
use crate::engine::quality::QualityScore;
use crate::engine::stability::StabilityState;
use crate::models::{ConfirmationEvent, RawCandidate};

/// Why a read was filtered out
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// Failed the structural gate
    Format(FormatReject),
    /// Mean line error missing or above the threshold
    Quality(QualityScore),
}

/// Detailed result of evaluating one read
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Read filtered out
    Rejected {
        /// Which gate failed
        reason: Rejection,
        /// Whether the read interrupted and dropped the tracked streak
        streak_reset: bool,
    },
    /// Read accepted, streak not long enough yet
    Tracking {
        /// Payload being tracked
        payload: String,
        /// Streak length including this read
        count: u32,
    },
    /// This read confirmed the session
    Confirmed(ConfirmationEvent),
    /// Session already confirmed; read ignored
    Latched,
}

impl Outcome {
    /// The confirmation carried by this outcome, if any
    pub fn into_event(self) -> Option<ConfirmationEvent> {
        match self {
            Outcome::Confirmed(event) => Some(event),
            _ => None,
        }
    }
}

/// Turns a stream of noisy reads into at most one confirmed ISBN per session.
///
/// Reads must be fed one at a time in arrival order. The engine does no
/// I/O and never blocks, so the host decides how reads reach it.
#[derive(Debug, Clone)]
pub struct ConfirmationEngine {
    config: EngineConfig,
    gate: FormatGate,
    state: StabilityState,
}

impl ConfirmationEngine {
    /// Engine with the reference thresholds
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Engine with custom thresholds.
    ///
    /// The config must pass [`EngineConfig::validate`]; a zero streak length
    /// would confirm on the first accepted read.
    pub fn with_config(config: EngineConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid engine config: {:?}",
            config
        );
        Self {
            gate: FormatGate::new(&config),
            config,
            state: StabilityState::default(),
        }
    }

    /// Active tuning
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current streak state
    pub fn state(&self) -> &StabilityState {
        &self.state
    }

    /// Whether this session already produced its result
    pub fn is_confirmed(&self) -> bool {
        self.state.is_confirmed()
    }

    /// Drop all tracking; call at session start and stop
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Evaluate one read, returning the event only on the confirming call
    pub fn evaluate(&mut self, candidate: &RawCandidate) -> Option<ConfirmationEvent> {
        self.assess(candidate).into_event()
    }

    /// Evaluate one read and report the full decision
    pub fn assess(&mut self, candidate: &RawCandidate) -> Outcome {
        if self.state.is_confirmed() {
            return Outcome::Latched;
        }

        let isbn = match self.gate.check(candidate) {
            Ok(isbn) => isbn,
            Err(reject) => return self.reject(candidate, Rejection::Format(reject)),
        };

        let score = QualityScore::from_line_errors(&candidate.line_errors);
        if !score.passes(self.config.quality_threshold) {
            return self.reject(candidate, Rejection::Quality(score));
        }

        let count = self.state.record(isbn.as_str());
        log::trace!("accepted {} (quality {}), streak {}", isbn, score, count);

        if count >= self.config.stable_required {
            self.state.latch();
            log::info!("confirmed {} after {} consecutive reads", isbn, count);
            return Outcome::Confirmed(ConfirmationEvent::new(isbn));
        }

        Outcome::Tracking {
            payload: isbn.as_str().to_owned(),
            count,
        }
    }

    fn reject(&mut self, candidate: &RawCandidate, reason: Rejection) -> Outcome {
        let streak_reset = self.state.interrupt(candidate.payload());
        if streak_reset {
            log::debug!(
                "streak dropped by rejected read {:?} ({:?})",
                candidate.payload,
                reason
            );
        } else {
            log::debug!("rejected {:?} ({:?})", candidate.payload, reason);
        }
        Outcome::Rejected {
            reason,
            streak_reset,
        }
    }
}

impl Default for ConfirmationEngine {
    fn default() -> Self {
        Self::new()
    }
}
