//! Flight Insight — flight telemetry log reduction.
//!
//! Modular structure:
//! - [`source`] — Decoded log messages, JSON-lines decoder
//! - [`normalize`] — Timestamp resolution and field cleaning
//! - [`reducer`] — Session bounds, KPIs and the GPS quality signal
//! - [`anomaly`] — GPS dropout interval segmentation
//! - [`flatten`] — `path: value` lines for retrieval context
//! - [`export`] — Sanitized transport envelope
//! - [`logging`] — Structured logging

pub mod config;
pub mod error;
pub mod source;
pub mod normalize;
pub mod reducer;
pub mod anomaly;
pub mod flatten;
pub mod export;
pub mod logging;

pub use config::InsightConfig;
pub use error::SourceError;
pub use source::{FileSource, JsonLinesSource, MemorySource, MessageSource, RawMessage, RawValue};
pub use normalize::{normalize, NormalizedRecord, PrimitiveValue};
pub use reducer::{reduce_session, SessionReducer, SessionSummary};
pub use anomaly::{segment_dropouts, AnomalyEvent, AnomalyKind, Segmenter};
pub use flatten::{flatten, Flatten};
pub use export::{parse_log, ParsedLog};
pub use logging::StructuredLogger;

/// Round to 2 decimals from the exact binary value; `{:.2}` formatting
/// does not introduce the error a multiply-by-100 would.
pub(crate) fn round2(x: f64) -> f64 {
    format!("{:.2}", x).parse().unwrap_or(x)
}
