//! Reliability anomalies derived from the positioning-quality signal.

mod segment;

pub use segment::{dropout_intervals, segment_dropouts, DropoutInterval, Segmenter};

use serde::{Deserialize, Serialize};

/// Wire strings are consumed by narrative formatting downstream; new kinds
/// must not reuse them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyKind {
    #[serde(rename = "gps_dropout")]
    GpsDropout,
    #[serde(rename = "gps_recovered")]
    GpsRecovered,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::GpsDropout => "gps_dropout",
            AnomalyKind::GpsRecovered => "gps_recovered",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEvent {
    #[serde(rename = "t")]
    pub timestamp: f64,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
}

impl AnomalyEvent {
    pub fn new(timestamp: f64, kind: AnomalyKind) -> Self {
        Self { timestamp, kind }
    }
}
