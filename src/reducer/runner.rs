//! Forward-only reduction of one session's message stream.

use super::gps::GpsRule;
use super::summary::{Kpis, SessionSummary};
use crate::anomaly::Segmenter;
use crate::config::{GpsConfig, InsightConfig};
use crate::error::SourceError;
use crate::normalize::{normalize, NormalizedRecord};
use crate::round2;
use crate::source::{MessageSource, RawMessage};
use tracing::info;

/// Incremental accumulator: push messages in arrival order, then `finish`.
pub struct SessionReducer {
    rule: GpsRule,
    records: Vec<NormalizedRecord>,
    bad_samples: Vec<f64>,
    span: Option<(f64, f64)>,
    dropped: usize,
}

impl SessionReducer {
    pub fn new(config: GpsConfig) -> Self {
        Self {
            rule: GpsRule::new(config),
            records: Vec::new(),
            bad_samples: Vec::new(),
            span: None,
            dropped: 0,
        }
    }

    pub fn push(&mut self, msg: RawMessage) {
        let Some(record) = normalize(msg) else {
            self.dropped += 1;
            return;
        };
        let t = record.time;
        self.span = Some(match self.span {
            Some((lo, hi)) => (lo.min(t), hi.max(t)),
            None => (t, t),
        });
        if self.rule.is_degraded_record(&record) {
            self.bad_samples.push(record.time);
        }
        self.records.push(record);
    }

    /// Messages dropped for lack of a usable timestamp
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Summary without anomalies; see [`SessionSummary::with_anomalies`].
    pub fn finish(self) -> SessionSummary {
        // Earliest to latest accepted time; equals last - first for time-ordered logs.
        let duration_seconds = self.span.map_or(0.0, |(lo, hi)| round2(hi - lo));
        SessionSummary {
            duration_seconds,
            kpis: Kpis {
                flight_time_seconds: duration_seconds.round_ties_even() as i64,
                message_count: self.records.len(),
            },
            anomalies: Vec::new(),
            quality_bad_samples: self.bad_samples,
            records: self.records,
        }
    }
}

/// Reduce a whole session and segment its dropouts. Fails only when the
/// source itself fails; individual messages never abort the reduction.
pub fn reduce_session<S>(source: &mut S, config: &InsightConfig) -> Result<SessionSummary, SourceError>
where
    S: MessageSource + ?Sized,
{
    let mut reducer = SessionReducer::new(config.gps.clone());
    while let Some(msg) = source.next_message()? {
        reducer.push(msg);
    }
    let dropped = reducer.dropped();
    let summary = reducer
        .finish()
        .with_anomalies(&Segmenter::new(config.segmenter.clone()));
    info!(
        records = summary.records.len(),
        dropped,
        duration_secs = summary.duration_seconds,
        bad_samples = summary.quality_bad_samples.len(),
        anomalies = summary.anomalies.len(),
        "session reduced"
    );
    Ok(summary)
}
