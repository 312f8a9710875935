//! JSON-lines log decoder.
//!
//! Accepts the two per-message shapes common MAVLink dump tools write:
//! `{"meta":{"type":"GPS","timestamp":12.3},"data":{...}}` and the flat
//! `{"mavpackettype":"GPS","_timestamp":12.3,...}` projection.

use super::{HashingReader, MessageSource, RawMessage, RawValue};
use crate::error::SourceError;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

const FLAT_TYPE_KEY: &str = "mavpackettype";
const FLAT_TIMESTAMP_KEY: &str = "_timestamp";

pub struct JsonLinesSource<R> {
    reader: R,
    line: String,
    line_no: usize,
    skipped: usize,
}

/// A log file decoded and fingerprinted in one pass
pub type FileSource = JsonLinesSource<BufReader<HashingReader<File>>>;

impl FileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(HashingReader::new(file))))
    }

    /// SHA-256 of the bytes consumed so far; the whole file once the
    /// source has returned `Ok(None)`.
    pub fn fingerprint(&self) -> String {
        self.reader.get_ref().hex_digest()
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Lines dropped so far because they did not decode to a message
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> MessageSource for JsonLinesSource<R> {
    fn next_message(&mut self) -> Result<Option<RawMessage>, SourceError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match decode_line(trimmed) {
                Some(msg) => return Ok(Some(msg)),
                None => {
                    self.skipped += 1;
                    debug!(line = self.line_no, "skipping undecodable log line");
                }
            }
        }
    }
}

fn decode_line(line: &str) -> Option<RawMessage> {
    let Value::Object(mut obj) = serde_json::from_str::<Value>(line).ok()? else {
        return None;
    };
    if let Some(Value::Object(meta)) = obj.remove("meta") {
        let msg_type = meta.get("type")?.as_str()?.to_string();
        let fields = match obj.remove("data") {
            Some(Value::Object(data)) => Some(into_fields(data)),
            _ => None,
        };
        return Some(RawMessage {
            msg_type,
            fields,
            capture_timestamp: meta.get("timestamp").and_then(Value::as_f64),
        });
    }
    let msg_type = obj.get(FLAT_TYPE_KEY)?.as_str()?.to_string();
    let capture_timestamp = obj.get(FLAT_TIMESTAMP_KEY).and_then(Value::as_f64);
    let fields = obj
        .into_iter()
        .filter(|(k, _)| k != FLAT_TYPE_KEY && k != FLAT_TIMESTAMP_KEY)
        .map(|(k, v)| (k, RawValue::from(v)))
        .collect();
    Some(RawMessage {
        msg_type,
        fields: Some(fields),
        capture_timestamp,
    })
}

fn into_fields(map: Map<String, Value>) -> Vec<(String, RawValue)> {
    map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect()
}
