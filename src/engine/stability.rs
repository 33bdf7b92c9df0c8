//! Consecutive-match tracking for one scanning session.

/// Mutable per-session streak state.
///
/// Owned by exactly one engine; a fresh session starts from
/// [`StabilityState::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StabilityState {
    last_payload: Option<String>,
    count: u32,
    confirmed: bool,
}

/// Read-only view of where the session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase<'a> {
    /// Nothing tracked yet
    Idle,
    /// Streak in progress
    Tracking {
        /// Payload being tracked
        payload: &'a str,
        /// Consecutive accepted reads so far
        count: u32,
    },
    /// Result delivered; terminal until reset
    Confirmed,
}

impl StabilityState {
    /// Back to the initial state
    pub fn reset(&mut self) {
        self.last_payload = None;
        self.count = 0;
        self.confirmed = false;
    }

    /// Payload of the current streak
    pub fn last_payload(&self) -> Option<&str> {
        self.last_payload.as_deref()
    }

    /// Length of the current streak
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether this session already produced its result
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Apply a rejected read.
    ///
    /// The streak is abandoned only when a *different* payload interrupts
    /// it. Returns `true` if the streak was dropped.
    pub fn interrupt(&mut self, payload: Option<&str>) -> bool {
        match (self.last_payload.as_deref(), payload) {
            (Some(tracked), Some(payload)) if tracked != payload => {
                self.last_payload = None;
                self.count = 0;
                true
            }
            _ => false,
        }
    }

    /// Apply an accepted read and return the new streak length
    pub fn record(&mut self, payload: &str) -> u32 {
        if self.last_payload.as_deref() == Some(payload) {
            self.count = self.count.saturating_add(1);
        } else {
            self.last_payload = Some(payload.to_owned());
            self.count = 1;
        }
        self.count
    }

    /// Mark the session as confirmed
    pub fn latch(&mut self) {
        self.confirmed = true;
    }

    /// Current phase
    pub fn phase(&self) -> Phase<'_> {
        if self.confirmed {
            return Phase::Confirmed;
        }
        match self.last_payload.as_deref() {
            Some(payload) => Phase::Tracking {
                payload,
                count: self.count,
            },
            None => Phase::Idle,
        }
    }
}
