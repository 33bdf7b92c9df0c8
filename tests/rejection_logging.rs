//! Log levels emitted by the engine, captured with an in-process logger

use isbn_confirm::{ConfirmationEngine, RawCandidate};
use log::{Level, Log, Metadata, Record};
use std::sync::Mutex;

struct Capture {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("isbn_confirm") {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    records: Mutex::new(Vec::new()),
};

const ISBN: &str = "9780306406157";

// Single test: the logger is process-wide
#[test]
fn test_every_rejection_logs_at_debug() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(log::LevelFilter::Trace);

    let mut engine = ConfirmationEngine::new();
    engine.evaluate(&RawCandidate::with_errors(ISBN, &[0.1]));
    // Same payload, poor quality: rejected without dropping the streak
    engine.evaluate(&RawCandidate::with_errors(ISBN, &[0.9]));
    // Not an ISBN, no streak to drop
    engine.evaluate(&RawCandidate::with_errors("", &[0.1]));
    // Different payload: rejected and drops the streak
    engine.evaluate(&RawCandidate::with_errors("1234567890123", &[0.1]));

    let records = CAPTURE.records.lock().unwrap();
    let rejections: Vec<&(Level, String)> = records
        .iter()
        .filter(|(_, msg)| msg.contains("rejected"))
        .collect();
    assert_eq!(rejections.len(), 3, "{records:?}");
    assert!(rejections.iter().all(|(level, _)| *level == Level::Debug));
    assert!(
        records
            .iter()
            .any(|(level, msg)| *level == Level::Trace && msg.starts_with("accepted"))
    );
}
