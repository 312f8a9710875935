//! Message normalizer: raw decoded message → timestamped record with cleaned fields.

mod value;

pub use value::PrimitiveValue;

use crate::source::RawMessage;
use serde::{Serialize, Serializer};

/// Embedded monotonic time field, in microseconds
pub const TIME_FIELD: &str = "TimeUS";

const MICROS_PER_SEC: f64 = 1_000_000.0;

/// Cleaned fields in decoder order. Duplicate names keep the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, PrimitiveValue)>);

impl Fields {
    pub fn insert(&mut self, name: String, value: PrimitiveValue) {
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PrimitiveValue> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrimitiveValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn sanitized(&self) -> Self {
        Fields(self.0.iter().map(|(k, v)| (k.clone(), v.sanitized())).collect())
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// One accepted message. `time` is always finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub time: f64,
    pub fields: Fields,
}

/// Resolve a message time in seconds: embedded `TimeUS` first, then the
/// decoder's capture timestamp. A zero `TimeUS` counts as unset.
pub fn resolve_time(msg: &RawMessage) -> Option<f64> {
    embedded_time(msg).or_else(|| msg.capture_timestamp.filter(|t| valid_time(*t)))
}

fn embedded_time(msg: &RawMessage) -> Option<f64> {
    let micros = PrimitiveValue::coerce(msg.field(TIME_FIELD)?.clone()).as_f64()?;
    if micros == 0.0 {
        return None;
    }
    Some(micros / MICROS_PER_SEC).filter(|t| valid_time(*t))
}

fn valid_time(t: f64) -> bool {
    t.is_finite() && t >= 0.0
}

/// Normalize one message. `None` when no usable timestamp exists; the
/// message is then dropped from the session.
pub fn normalize(msg: RawMessage) -> Option<NormalizedRecord> {
    let time = resolve_time(&msg)?;
    let mut fields = Fields::default();
    for (name, value) in msg.fields.unwrap_or_default() {
        fields.insert(name, PrimitiveValue::coerce(value));
    }
    Some(NormalizedRecord {
        msg_type: msg.msg_type,
        time,
        fields,
    })
}
