//! Closed primitive value type and the lossy coercion into it.

use crate::source::RawValue;
use serde::{Serialize, Serializer};

/// A field value safe to hand to any downstream consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl PrimitiveValue {
    /// Total coercion: primitives pass through, containers and byte payloads
    /// are rendered to text, and anything that cannot be rendered becomes null.
    pub fn coerce(value: RawValue) -> Self {
        match value {
            RawValue::Null => PrimitiveValue::Null,
            RawValue::Bool(b) => PrimitiveValue::Bool(b),
            RawValue::Int(i) => PrimitiveValue::Int(i),
            RawValue::Float(f) => PrimitiveValue::Float(f),
            RawValue::Text(s) => PrimitiveValue::Text(s),
            RawValue::Bytes(b) => String::from_utf8(b).map_or(PrimitiveValue::Null, PrimitiveValue::Text),
            other => render(&other).map_or(PrimitiveValue::Null, PrimitiveValue::Text),
        }
    }

    /// Numeric reading, if the value holds one. Non-finite readings count as absent.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            PrimitiveValue::Int(i) => *i as f64,
            PrimitiveValue::Float(f) => *f,
            PrimitiveValue::Bool(b) => f64::from(u8::from(*b)),
            PrimitiveValue::Text(s) => s.trim().parse::<f64>().ok()?,
            PrimitiveValue::Null => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Same value with non-finite floats replaced by null
    pub fn sanitized(&self) -> Self {
        match self {
            PrimitiveValue::Float(f) if !f.is_finite() => PrimitiveValue::Null,
            other => other.clone(),
        }
    }
}

impl Serialize for PrimitiveValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PrimitiveValue::Null => serializer.serialize_none(),
            PrimitiveValue::Bool(b) => serializer.serialize_bool(*b),
            PrimitiveValue::Int(i) => serializer.serialize_i64(*i),
            PrimitiveValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            PrimitiveValue::Float(_) => serializer.serialize_none(),
            PrimitiveValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Render a container; `None` if any element cannot be rendered.
fn render(value: &RawValue) -> Option<String> {
    match value {
        RawValue::Null => Some("null".to_string()),
        RawValue::Bool(b) => Some(b.to_string()),
        RawValue::Int(i) => Some(i.to_string()),
        RawValue::Float(f) => Some(f.to_string()),
        RawValue::Text(s) => Some(format!("{:?}", s)),
        RawValue::Bytes(b) => std::str::from_utf8(b).ok().map(|s| format!("{:?}", s)),
        RawValue::List(items) => {
            let parts = items.iter().map(render).collect::<Option<Vec<_>>>()?;
            Some(format!("[{}]", parts.join(", ")))
        }
        RawValue::Map(entries) => {
            let parts = entries
                .iter()
                .map(|(k, v)| render(v).map(|v| format!("{:?}: {}", k, v)))
                .collect::<Option<Vec<_>>>()?;
            Some(format!("{{{}}}", parts.join(", ")))
        }
    }
}
