use isbn_confirm::RawCandidate;

/// Noisy session: misreads and blurred frames around one ISBN
pub fn noisy_session(len: usize) -> Vec<RawCandidate> {
    (0..len)
        .map(|i| {
            let payload = if i % 7 == 3 { "4006381333931" } else { "9780306406157" };
            let err = if i % 5 == 4 { 0.9 } else { 0.2 };
            RawCandidate::with_errors(payload, &[err, 0.1, err])
        })
        .collect()
}
