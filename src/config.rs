//! Engine configuration

use std::path::PathBuf;

use log::warn;

/// Configuration for one engine instance
///
/// Mirrors the hosting component's property set: the anomaly-injection
/// settings plus an optional replay-dataset override. Configuration
/// changes are modeled by dropping the engine and constructing a fresh
/// one with the new settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether fault injection is active
    pub anomaly_enabled: bool,

    /// Chance, in integer percent (0-100), that a given advance delivers
    /// a synthetic all-anomaly frame instead of recorded data
    pub anomaly_percentage: u8,

    /// Value substituted into every field of an anomaly frame
    pub anomaly_value: f32,

    /// Replay dataset override; `None` uses the bundled recording.
    /// A `.gz` path is gunzipped, anything else is read as plain NDJSON.
    pub dataset_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            anomaly_enabled: false,
            anomaly_percentage: 0,
            anomaly_value: 0.0,
            dataset_path: None,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with fault injection enabled
    pub fn with_anomaly(percentage: u8, value: f32) -> Self {
        Self {
            anomaly_enabled: true,
            anomaly_percentage: percentage,
            anomaly_value: value,
            ..Default::default()
        }
    }

    /// Create a configuration replaying an external dataset
    pub fn with_dataset(path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Anomaly percentage clamped to the valid range
    ///
    /// The hosting lifecycle must come up usable even on an out-of-range
    /// property, so values above 100 are clamped rather than rejected.
    pub(crate) fn effective_percentage(&self) -> u8 {
        if self.anomaly_percentage > 100 {
            warn!(
                "anomaly percentage {} out of range, clamping to 100",
                self.anomaly_percentage
            );
            100
        } else {
            self.anomaly_percentage
        }
    }
}
