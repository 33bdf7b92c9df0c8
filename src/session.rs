//! Scanner session lifecycle.
//!
//! A [`Session`] sits between the decoder feed and the presentation layer:
//! it owns one [`ConfirmationEngine`], subscribes and unsubscribes from the
//! feed, and hands the confirmed ISBN to a [`ConfirmationSink`] once.

use crate::engine::{ConfirmationEngine, EngineConfig};
use crate::models::{ConfirmationEvent, RawCandidate};

/// Receiver of confirmed results (display, callback, channel...)
pub trait ConfirmationSink {
    /// Called exactly once per confirmed session
    fn confirmed(&mut self, event: &ConfirmationEvent);
}

impl<F> ConfirmationSink for F
where
    F: FnMut(&ConfirmationEvent),
{
    fn confirmed(&mut self, event: &ConfirmationEvent) {
        (self)(event)
    }
}

/// Sink that keeps every delivered event
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<ConfirmationEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivered events in order
    pub fn events(&self) -> &[ConfirmationEvent] {
        &self.events
    }

    /// Number of delivered events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing was delivered
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ConfirmationSink for EventLog {
    fn confirmed(&mut self, event: &ConfirmationEvent) {
        self.events.push(event.clone());
    }
}

/// One scanner session driving a confirmation engine
pub struct Session<S> {
    engine: ConfirmationEngine,
    sink: S,
    listening: bool,
}

impl<S: ConfirmationSink> Session<S> {
    /// Create a stopped session with the reference thresholds
    pub fn new(sink: S) -> Self {
        Self::with_config(EngineConfig::default(), sink)
    }

    /// Create a stopped session with custom thresholds
    pub fn with_config(config: EngineConfig, sink: S) -> Self {
        Self {
            engine: ConfirmationEngine::with_config(config),
            sink,
            listening: false,
        }
    }

    /// Reset tracking and subscribe to the feed.
    ///
    /// Does nothing if the session is already listening.
    pub fn start(&mut self) {
        if self.listening {
            log::debug!("start ignored: session already listening");
            return;
        }
        self.engine.reset();
        self.listening = true;
        log::debug!("session started");
    }

    /// Unsubscribe from the feed and discard all tracking
    pub fn stop(&mut self) {
        self.listening = false;
        self.engine.reset();
        log::debug!("session stopped");
    }

    /// Whether reads are currently being evaluated
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Feed callback: evaluate one read from the decoder.
    ///
    /// Reads arriving while the session is not listening are dropped. On
    /// confirmation the sink is notified and the session detaches itself
    /// from the feed; the confirmed state is kept until the next
    /// [`start`](Self::start) or [`stop`](Self::stop).
    pub fn on_detected(&mut self, candidate: &RawCandidate) -> Option<ConfirmationEvent> {
        if !self.listening {
            return None;
        }
        let event = self.engine.evaluate(candidate)?;
        self.listening = false;
        self.sink.confirmed(&event);
        Some(event)
    }

    /// Push reads through [`on_detected`](Self::on_detected) until one confirms
    pub fn run<I>(&mut self, feed: I) -> Option<ConfirmationEvent>
    where
        I: IntoIterator<Item = RawCandidate>,
    {
        for candidate in feed {
            if !self.listening {
                break;
            }
            if let Some(event) = self.on_detected(&candidate) {
                return Some(event);
            }
        }
        None
    }

    /// Underlying engine
    pub fn engine(&self) -> &ConfirmationEngine {
        &self.engine
    }

    /// Presentation sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Tear down the session and return the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
