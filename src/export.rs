//! Transport boundary: sanitized JSON for the serving layer and flattened
//! context lines for retrieval.

use crate::config::{FlattenConfig, InsightConfig};
use crate::error::SourceError;
use crate::flatten::Flatten;
use crate::reducer::{reduce_session, SessionSummary};
use crate::source::FileSource;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// What the serving layer receives for one uploaded log
#[derive(Debug, Clone, Serialize)]
pub struct ParsedLog {
    pub session_id: String,
    /// SHA-256 of the log bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    pub data: SessionSummary,
}

impl ParsedLog {
    /// Wraps a sanitized copy of `summary`
    pub fn new(session_id: impl Into<String>, summary: &SessionSummary) -> Self {
        Self {
            session_id: session_id.into(),
            fingerprint: None,
            data: summary.sanitized(),
        }
    }

    pub fn with_fingerprint(mut self, fingerprint: String) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }
}

/// JSON-compatible value of the summary, non-finite floats as null
pub fn to_transport_value(summary: &SessionSummary) -> Result<Value, serde_json::Error> {
    serde_json::to_value(summary.sanitized())
}

/// Flattened lines of the whole summary
pub fn summary_lines(summary: &SessionSummary, config: &FlattenConfig) -> Result<Vec<String>, serde_json::Error> {
    let value = to_transport_value(summary)?;
    Ok(Flatten::new(&value, "")
        .with_preview_items(config.preview_items)
        .collect())
}

/// Open, fingerprint and reduce a JSON-lines log. The session id is supplied
/// by the caller; nothing is cached between calls.
pub fn parse_log(path: &Path, session_id: &str, config: &InsightConfig) -> Result<ParsedLog, SourceError> {
    let mut source = FileSource::open(path)?;
    let summary = reduce_session(&mut source, config)?;
    let fp = source.fingerprint();
    info!(
        session_id,
        skipped_lines = source.skipped(),
        fingerprint = %fp,
        "log parsed"
    );
    Ok(ParsedLog::new(session_id, &summary).with_fingerprint(fp))
}
