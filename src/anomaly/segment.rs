//! Segments sparse degraded-quality samples into closed dropout intervals.

use super::{AnomalyEvent, AnomalyKind};
use crate::config::SegmenterConfig;
use crate::round2;

/// Closed interval of sustained degradation, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropoutInterval {
    pub start: f64,
    pub end: f64,
}

/// Group samples into intervals. Consecutive sorted samples further apart
/// than `gap` (strictly) belong to different intervals. Input order does not matter.
pub fn dropout_intervals(samples: &[f64], gap: f64) -> Vec<DropoutInterval> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let Some((&first, rest)) = sorted.split_first() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut start = first;
    let mut prev = first;
    for &t in rest {
        if t - prev > gap {
            out.push(DropoutInterval { start, end: prev });
            start = t;
        }
        prev = t;
    }
    out.push(DropoutInterval { start, end: prev });
    out
}

/// Dropout/recovered event pairs, one per interval, timestamps rounded to 2 decimals.
pub fn segment_dropouts(samples: &[f64], gap: f64) -> Vec<AnomalyEvent> {
    dropout_intervals(samples, gap)
        .into_iter()
        .flat_map(|iv| {
            [
                AnomalyEvent::new(round2(iv.start), AnomalyKind::GpsDropout),
                AnomalyEvent::new(round2(iv.end), AnomalyKind::GpsRecovered),
            ]
        })
        .collect()
}

pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn segment(&self, samples: &[f64]) -> Vec<AnomalyEvent> {
        segment_dropouts(samples, self.config.gap_secs)
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }
}
