use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest mean line error still accepted
pub const DEFAULT_QUALITY_THRESHOLD: f64 = 0.6;
/// Consecutive matching reads needed to confirm
pub const DEFAULT_STABLE_REQUIRED: u32 = 3;

const MAX_STABLE_REQUIRED: u32 = 64;

fn default_quality_threshold() -> f64 {
    DEFAULT_QUALITY_THRESHOLD
}

fn default_stable_required() -> u32 {
    DEFAULT_STABLE_REQUIRED
}

/// Tuning for the confirmation engine.
///
/// `Default` yields the reference behaviour: threshold 0.6, three
/// consecutive reads, no symbology or check digit filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Mean line error above which a read is rejected (lower is better)
    #[serde(default = "default_quality_threshold")]
    pub quality_threshold: f64,
    /// Consecutive accepted reads of one payload needed to confirm
    #[serde(default = "default_stable_required")]
    pub stable_required: u32,
    /// Only accept reads tagged with this symbology (tag-less reads pass)
    #[serde(default)]
    pub required_format: Option<String>,
    /// Reject payloads whose EAN-13 check digit is wrong
    #[serde(default)]
    pub require_check_digit: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quality_threshold: DEFAULT_QUALITY_THRESHOLD,
            stable_required: DEFAULT_STABLE_REQUIRED,
            required_format: None,
            require_check_digit: false,
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with `ISBN_*` environment variables.
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Overlay values produced by `lookup` (keyed by environment variable name)
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ISBN_QUALITY_THRESHOLD")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
        {
            self.quality_threshold = v;
        }
        if let Some(v) = lookup("ISBN_STABLE_REQUIRED").and_then(|v| v.trim().parse::<u32>().ok()) {
            self.stable_required = v.clamp(1, MAX_STABLE_REQUIRED);
        }
        if let Some(v) = lookup("ISBN_REQUIRED_FORMAT") {
            let v = v.trim();
            self.required_format = if v.is_empty() {
                None
            } else {
                Some(v.to_owned())
            };
        }
        if let Some(v) = lookup("ISBN_REQUIRE_CHECK_DIGIT") {
            self.require_check_digit = matches!(
                v.trim(),
                "1" | "true" | "TRUE" | "yes" | "YES"
            );
        }
        self
    }

    /// Check that the thresholds can ever confirm anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.quality_threshold.is_finite() || self.quality_threshold < 0.0 {
            return Err(ConfigError::QualityThreshold(self.quality_threshold));
        }
        if self.stable_required == 0 || self.stable_required > MAX_STABLE_REQUIRED {
            return Err(ConfigError::StableRequired(self.stable_required));
        }
        Ok(())
    }

    /// Load and validate a JSON config; missing fields take defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
