//! Session-level summary produced by one reduction.

use crate::anomaly::{AnomalyEvent, Segmenter};
use crate::normalize::NormalizedRecord;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpis {
    /// Duration rounded to whole seconds
    pub flight_time_seconds: i64,
    /// Accepted records
    pub message_count: usize,
}

/// Field order is the order the flattener walks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Latest minus earliest accepted timestamp, 2 decimals; 0.0 for an empty session
    pub duration_seconds: f64,
    pub kpis: Kpis,
    pub anomalies: Vec<AnomalyEvent>,
    /// Timestamps of degraded positioning samples, in arrival order
    pub quality_bad_samples: Vec<f64>,
    pub records: Vec<NormalizedRecord>,
}

impl SessionSummary {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the anomaly list with the segmentation of the bad samples
    pub fn with_anomalies(mut self, segmenter: &Segmenter) -> Self {
        self.anomalies = segmenter.segment(&self.quality_bad_samples);
        self
    }

    /// Copy with every non-finite field value replaced by null. Timestamps,
    /// durations and sample times are finite by construction.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        for r in &mut out.records {
            r.fields = r.fields.sanitized();
        }
        out
    }
}
