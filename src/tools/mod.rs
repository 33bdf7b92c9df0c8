//! Trace helpers shared by the CLI, integration tests and benches.
//!
//! A trace is a JSON Lines file holding the reads a decoder produced for
//! one scanning session, one [`RawCandidate`] per line.

use crate::engine::{ConfirmationEngine, EngineConfig, FormatReject, Outcome, Rejection};
use crate::error::TraceError;
use crate::models::{ConfirmationEvent, RawCandidate};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Parse trace text; blank lines and `#` comments are skipped.
pub fn parse_trace(contents: &str) -> Result<Vec<RawCandidate>, TraceError> {
    let mut candidates = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let candidate = serde_json::from_str(line).map_err(|source| TraceError::Parse {
            line: idx + 1,
            source,
        })?;
        candidates.push(candidate);
    }
    Ok(candidates)
}

/// Load a trace file from disk.
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<RawCandidate>, TraceError> {
    let contents = fs::read_to_string(path)?;
    parse_trace(&contents)
}

/// Where the confirmation of a replayed session happened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayConfirmation {
    /// 1-based index of the confirming read
    pub call: usize,
    /// The confirmed result
    pub event: ConfirmationEvent,
}

/// Summary of one replayed session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Source trace, if replayed from a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Reads in the trace
    pub candidates: usize,
    /// Reads that passed both gates before confirmation
    pub accepted: usize,
    /// Reads failing the structural gate
    pub rejected_format: usize,
    /// Reads failing the quality gate
    pub rejected_quality: usize,
    /// Rejected reads that dropped a tracked streak
    pub streak_resets: usize,
    /// Reads ignored after confirmation
    pub latched: usize,
    /// Confirmation, if the session confirmed
    pub confirmation: Option<ReplayConfirmation>,
}

/// Replay reads through a fresh engine as one session
pub fn replay(candidates: &[RawCandidate], config: &EngineConfig) -> ReplayReport {
    let mut engine = ConfirmationEngine::with_config(config.clone());
    let mut report = ReplayReport {
        candidates: candidates.len(),
        ..ReplayReport::default()
    };

    for (idx, candidate) in candidates.iter().enumerate() {
        match engine.assess(candidate) {
            Outcome::Rejected {
                reason,
                streak_reset,
            } => {
                match reason {
                    Rejection::Format(_) => report.rejected_format += 1,
                    Rejection::Quality(_) => report.rejected_quality += 1,
                }
                if streak_reset {
                    report.streak_resets += 1;
                }
            }
            Outcome::Tracking { .. } => report.accepted += 1,
            Outcome::Confirmed(event) => {
                report.accepted += 1;
                report.confirmation = Some(ReplayConfirmation {
                    call: idx + 1,
                    event,
                });
            }
            Outcome::Latched => report.latched += 1,
        }
    }

    report
}

/// Load and replay one trace file
pub fn replay_file<P: AsRef<Path>>(
    path: P,
    config: &EngineConfig,
) -> Result<ReplayReport, TraceError> {
    let path = path.as_ref();
    let candidates = load_trace(path)?;
    let mut report = replay(&candidates, config);
    report.path = Some(path.to_path_buf());
    Ok(report)
}

/// Replay every trace as an independent session, in parallel.
///
/// Results are returned in the order of `paths`.
pub fn replay_all(
    paths: &[PathBuf],
    config: &EngineConfig,
) -> Vec<(PathBuf, Result<ReplayReport, TraceError>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), replay_file(path, config)))
        .collect()
}

/// Replay every `*.jsonl` trace under `root`, sorted, with an optional limit.
///
/// Each file is an independent session; see [`replay_all`].
pub fn replay_dir<P: AsRef<Path>>(
    root: P,
    limit: Option<usize>,
    config: &EngineConfig,
) -> Vec<(PathBuf, Result<ReplayReport, TraceError>)> {
    let traces: Vec<PathBuf> = trace_iter(root, limit).collect();
    log::debug!("replaying {} traces", traces.len());
    replay_all(&traces, config)
}

/// Human-readable label for a structural rejection
pub fn format_reject_label(reject: FormatReject) -> &'static str {
    match reject {
        FormatReject::Pattern => "not an ISBN-13",
        FormatReject::Symbology => "wrong symbology",
        FormatReject::CheckDigit => "bad check digit",
    }
}

/// Trace root directory from environment variables.
pub fn trace_root_from_env() -> PathBuf {
    env::var("ISBN_TRACE_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("traces"))
}

/// Trace limit from environment variables.
///
/// Returns `None` (all traces) when `ISBN_TRACE_LIMIT` is unset or `0`.
pub fn trace_limit_from_env() -> Option<usize> {
    match env::var("ISBN_TRACE_LIMIT") {
        Ok(value) => value
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|v| if v == 0 { None } else { Some(v) }),
        Err(_) => None,
    }
}

/// Iterate `*.jsonl` trace paths under `root`, sorted, with an optional limit.
pub fn trace_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut traces = collect_traces(root.as_ref());
    traces.sort();
    if let Some(limit) = limit {
        traces.truncate(limit);
    }
    traces.into_iter()
}

fn collect_traces(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut traces = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                if ext.to_string_lossy().eq_ignore_ascii_case("jsonl") {
                    traces.push(path);
                }
            }
        }
    }

    traces
}
