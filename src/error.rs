//! Error types for file-backed helpers.
//!
//! The confirmation engine itself never fails; these only cover reading
//! configs and candidate traces from disk.

/// Failure to load or save an [`EngineConfig`](crate::engine::config::EngineConfig)
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The file is not valid config JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Threshold is negative or not finite
    #[error("quality threshold must be finite and >= 0, got {0}")]
    QualityThreshold(f64),
    /// Streak length outside 1..=64
    #[error("stable_required must be in 1..=64, got {0}")]
    StableRequired(u32),
}

/// Failure to load a candidate trace
#[derive(thiserror::Error, Debug)]
pub enum TraceError {
    /// Reading the file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A line is not a valid candidate record
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}
