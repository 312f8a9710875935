//! Pipeline configuration. Every section falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Positioning-quality signal extraction
    pub gps: GpsConfig,
    /// Dropout interval segmentation
    pub segmenter: SegmenterConfig,
    /// Flattened line output
    pub flatten: FlattenConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GpsConfig {
    /// Message types that carry a positioning report
    pub message_types: Vec<String>,
    /// Satellite count aliases, highest priority first
    pub satellite_fields: Vec<String>,
    /// Fix quality aliases, highest priority first
    pub fix_fields: Vec<String>,
    /// Fewer visible satellites than this is degraded
    pub min_satellites: f64,
    /// Fix quality below this is degraded (lower = worse)
    pub min_fix_quality: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Gaps strictly longer than this (seconds) split two episodes
    pub gap_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Sequences longer than this are shown truncated to this many items
    pub preview_items: usize,
    /// Lines printed by the CLI preview
    pub preview_lines: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            message_types: ["GPS", "GPS2", "GPS_RAW_INT", "GPS2_RAW"]
                .into_iter()
                .map(String::from)
                .collect(),
            satellite_fields: vec!["NSats".to_string(), "satellites_visible".to_string()],
            fix_fields: vec![
                "Status".to_string(),
                "FixType".to_string(),
                "fix_type".to_string(),
            ],
            min_satellites: 4.0,
            min_fix_quality: 2,
        }
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self { gap_secs: 3.0 }
    }
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            preview_items: 3,
            preview_lines: 30,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl InsightConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<InsightConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
