//! Log sources: decoded messages as handed over by a log decoder.
//! The decoder owns the container format; this crate only sees typed fields.

mod jsonl;

use crate::error::SourceError;
use sha2::{Digest, Sha256};
use std::io::{self, Read};

pub use jsonl::{FileSource, JsonLinesSource};

/// Field value of a decoded message, before cleaning
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Raw byte payloads (char arrays, blobs); may not be valid UTF-8
    Bytes(Vec<u8>),
    List(Vec<RawValue>),
    Map(Vec<(String, RawValue)>),
}

/// One decoded log message
#[derive(Debug, Clone, PartialEq)]
pub struct RawMessage {
    pub msg_type: String,
    /// Named fields in decoder order. `None` when the decoder offers no field projection.
    pub fields: Option<Vec<(String, RawValue)>>,
    /// Low-resolution capture time attached by the decoder (seconds)
    pub capture_timestamp: Option<f64>,
}

impl RawMessage {
    pub fn new(msg_type: impl Into<String>) -> Self {
        Self {
            msg_type: msg_type.into(),
            fields: Some(Vec::new()),
            capture_timestamp: None,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.fields
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn with_capture_timestamp(mut self, ts: f64) -> Self {
        self.capture_timestamp = Some(ts);
        self
    }

    pub fn without_projection(mut self) -> Self {
        self.fields = None;
        self
    }

    /// First field with this name
    pub fn field(&self, name: &str) -> Option<&RawValue> {
        self.fields
            .as_ref()?
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }
}

/// Forward-only stream of decoded messages for one session.
pub trait MessageSource {
    /// Next message, `Ok(None)` at end of stream. An `Err` aborts the session.
    fn next_message(&mut self) -> Result<Option<RawMessage>, SourceError>;
}

/// Messages already decoded in memory
pub struct MemorySource {
    messages: std::vec::IntoIter<RawMessage>,
}

impl From<Vec<RawMessage>> for MemorySource {
    fn from(messages: Vec<RawMessage>) -> Self {
        Self {
            messages: messages.into_iter(),
        }
    }
}

impl MessageSource for MemorySource {
    fn next_message(&mut self) -> Result<Option<RawMessage>, SourceError> {
        Ok(self.messages.next())
    }
}

/// Reader that feeds every byte it hands out into a SHA-256 digest, so a
/// log is fingerprinted in the same pass that decodes it.
pub struct HashingReader<R> {
    inner: R,
    hasher: Sha256,
}

impl<R: Read> HashingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    /// Hex digest of the bytes read so far
    pub fn hex_digest(&self) -> String {
        format!("{:x}", self.hasher.clone().finalize())
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Int(i),
                None => RawValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => RawValue::Text(s),
            Value::Array(items) => RawValue::List(items.into_iter().map(RawValue::from).collect()),
            Value::Object(map) => {
                RawValue::Map(map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect())
            }
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int(i64::from(v))
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(v: Vec<u8>) -> Self {
        RawValue::Bytes(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_field_lookup() {
        let m = RawMessage::new("GPS")
            .with_field("NSats", 7)
            .with_field("Status", 3)
            .with_capture_timestamp(12.5);
        assert_eq!(m.field("NSats"), Some(&RawValue::Int(7)));
        assert_eq!(m.field("missing"), None);
        assert_eq!(m.capture_timestamp, Some(12.5));
        assert!(m.without_projection().field("NSats").is_none());
    }

    #[test]
    fn json_numbers_keep_integer_shape() {
        assert_eq!(RawValue::from(serde_json::json!(42)), RawValue::Int(42));
        assert_eq!(RawValue::from(serde_json::json!(1.5)), RawValue::Float(1.5));
        assert_eq!(
            RawValue::from(serde_json::json!(u64::MAX)),
            RawValue::Float(u64::MAX as f64)
        );
    }

    #[test]
    fn hashing_reader_digests_what_it_reads() {
        let mut reader = HashingReader::new(&b"abc"[..]);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"abc");
        assert_eq!(
            reader.hex_digest(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hashing_reader_survives_small_reads() {
        let data = b"{\"meta\":{\"type\":\"ATT\"}}\n".repeat(50);
        let mut reader = HashingReader::new(&data[..]);
        let mut chunk = [0u8; 7];
        while reader.read(&mut chunk).unwrap() > 0 {}
        assert_eq!(reader.hex_digest(), format!("{:x}", Sha256::digest(&data)));
    }
}
