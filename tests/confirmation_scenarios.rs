//! End-to-end scenarios for the confirmation engine
//!
//! Each test feeds a recorded-style sequence of decoder reads through a
//! fresh engine and checks on which call (if any) the ISBN is confirmed.

use isbn_confirm::{ConfirmationEngine, EventLog, LineError, RawCandidate, Session};

const ISBN: &str = "9780306406157";

fn read(payload: &str, err: f64) -> RawCandidate {
    RawCandidate::with_errors(payload, &[err])
}

/// 1-based indices of the calls that returned a confirmation
fn confirming_calls(engine: &mut ConfirmationEngine, reads: &[RawCandidate]) -> Vec<usize> {
    reads
        .iter()
        .enumerate()
        .filter_map(|(i, r)| engine.evaluate(r).map(|_| i + 1))
        .collect()
}

#[test]
fn test_three_clean_reads_confirm_on_third() {
    let reads = [read(ISBN, 0.2), read(ISBN, 0.3), read(ISBN, 0.1)];
    let mut engine = ConfirmationEngine::new();
    assert_eq!(engine.evaluate(&reads[0]), None);
    assert_eq!(engine.evaluate(&reads[1]), None);
    let event = engine.evaluate(&reads[2]).expect("confirmation on third read");
    assert_eq!(event.payload(), ISBN);
}

#[test]
fn test_non_isbn_read_resets_streak() {
    let reads = [
        read(ISBN, 0.2),
        read("1234567890123", 0.1),
        read(ISBN, 0.2),
        read(ISBN, 0.1),
        read(ISBN, 0.3),
    ];
    let mut engine = ConfirmationEngine::new();
    assert_eq!(confirming_calls(&mut engine, &reads), vec![5]);
}

#[test]
fn test_two_matches_then_interrupt_then_three_fresh() {
    let reads = [
        read(ISBN, 0.1),
        read(ISBN, 0.1),
        read("9791234567896", 0.95),
        read(ISBN, 0.1),
        read(ISBN, 0.1),
        read(ISBN, 0.1),
    ];
    let mut engine = ConfirmationEngine::new();
    assert_eq!(confirming_calls(&mut engine, &reads), vec![6]);
}

#[test]
fn test_quality_boundary() {
    let mut at = ConfirmationEngine::new();
    let reads = [read(ISBN, 0.6), read(ISBN, 0.6), read(ISBN, 0.6)];
    assert_eq!(confirming_calls(&mut at, &reads), vec![3]);

    let mut above = ConfirmationEngine::new();
    let reads = [read(ISBN, 0.61), read(ISBN, 0.61), read(ISBN, 0.61)];
    assert!(confirming_calls(&mut above, &reads).is_empty());
    assert_eq!(above.state().count(), 0);
}

#[test]
fn test_mean_over_lines_ignores_missing_entries() {
    let candidate = RawCandidate::new(
        ISBN,
        vec![
            LineError::Measured(0.5),
            LineError::Missing,
            LineError::Measured(0.7),
            LineError::Missing,
        ],
    );
    let reads = vec![candidate; 3];
    let mut engine = ConfirmationEngine::new();
    // mean 0.6 is at the threshold
    assert_eq!(confirming_calls(&mut engine, &reads), vec![3]);
}

#[test]
fn test_non_isbn_payloads_never_confirm() {
    let payloads = [
        "1234567890123",
        "9770306406157",
        "978030640615",
        "97803064061577",
        "978-0306406157",
        "",
        "abcdefghijklm",
    ];
    for payload in payloads {
        let mut engine = ConfirmationEngine::new();
        let reads: Vec<_> = (0..20).map(|_| read(payload, 0.0)).collect();
        assert!(
            confirming_calls(&mut engine, &reads).is_empty(),
            "payload {payload:?} must never confirm"
        );
    }
}

#[test]
fn test_at_most_one_confirmation_per_session() {
    let mut reads = Vec::new();
    for i in 0..60 {
        let payload = if i % 7 == 3 { "9791234567896" } else { ISBN };
        let err = if i % 5 == 4 { 0.9 } else { 0.2 };
        reads.push(read(payload, err));
    }
    let mut engine = ConfirmationEngine::new();
    assert_eq!(confirming_calls(&mut engine, &reads).len(), 1);
}

#[test]
fn test_reset_mid_streak_requires_three_fresh_reads() {
    let mut engine = ConfirmationEngine::new();
    engine.evaluate(&read(ISBN, 0.1));
    engine.evaluate(&read(ISBN, 0.1));
    assert_eq!(engine.state().count(), 2);
    engine.reset();
    let reads = [read(ISBN, 0.1), read(ISBN, 0.1), read(ISBN, 0.1)];
    assert_eq!(confirming_calls(&mut engine, &reads), vec![3]);
}

#[test]
fn test_independent_sessions_do_not_share_state() {
    let mut first = ConfirmationEngine::new();
    let mut second = ConfirmationEngine::new();
    first.evaluate(&read(ISBN, 0.1));
    first.evaluate(&read(ISBN, 0.1));
    assert_eq!(second.evaluate(&read(ISBN, 0.1)), None);
    assert!(first.evaluate(&read(ISBN, 0.1)).is_some());
    assert!(!second.is_confirmed());
}

#[test]
fn test_session_lifecycle_delivers_once() {
    let mut session = Session::new(EventLog::new());
    session.start();
    let feed = vec![read(ISBN, 0.2); 10];
    for candidate in &feed {
        session.on_detected(candidate);
    }
    session.stop();
    let log = session.into_sink();
    assert_eq!(log.len(), 1);
    assert_eq!(log.events()[0].payload(), ISBN);
}
