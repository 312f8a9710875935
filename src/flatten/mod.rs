//! Lossy linearization of a nested summary into `path: value` lines.
//!
//! Objects are walked depth-first in their own key order, building dotted
//! paths. Every other value is a leaf; sequences longer than the preview
//! size are cut down to their first items and marked as truncated.

use serde_json::{map, Value};

/// Appended to a sequence preview that dropped items
pub const TRUNCATION_MARKER: &str = "(truncated)";

pub const DEFAULT_PREVIEW_ITEMS: usize = 3;

/// Lazy line iterator over a borrowed JSON tree. Single pass.
pub struct Flatten<'a> {
    stack: Vec<(String, map::Iter<'a>)>,
    root_leaf: Option<(String, &'a Value)>,
    preview_items: usize,
}

/// Flatten `value` under `prefix` (empty at the top) with the default preview size.
pub fn flatten<'a>(value: &'a Value, prefix: &str) -> Flatten<'a> {
    Flatten::new(value, prefix)
}

impl<'a> Flatten<'a> {
    pub fn new(value: &'a Value, prefix: &str) -> Self {
        let mut out = Self {
            stack: Vec::new(),
            root_leaf: None,
            preview_items: DEFAULT_PREVIEW_ITEMS,
        };
        match value {
            Value::Object(obj) => out.stack.push((prefix.to_string(), obj.iter())),
            leaf => out.root_leaf = Some((prefix.to_string(), leaf)),
        }
        out
    }

    pub fn with_preview_items(mut self, n: usize) -> Self {
        self.preview_items = n;
        self
    }
}

impl Iterator for Flatten<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some((label, leaf)) = self.root_leaf.take() {
            return Some(render_line(&label, leaf, self.preview_items));
        }
        loop {
            let (prefix, entries) = self.stack.last_mut()?;
            let Some((key, value)) = entries.next() else {
                self.stack.pop();
                continue;
            };
            let label = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match value {
                Value::Object(obj) => self.stack.push((label, obj.iter())),
                leaf => return Some(render_line(&label, leaf, self.preview_items)),
            }
        }
    }
}

fn render_line(label: &str, value: &Value, preview_items: usize) -> String {
    match value {
        Value::Array(items) if items.len() > preview_items => {
            format!("{}: {} {}", label, render_items(&items[..preview_items]), TRUNCATION_MARKER)
        }
        Value::Array(items) => format!("{}: {}", label, render_items(items)),
        Value::String(s) => format!("{}: {}", label, s),
        other => format!("{}: {}", label, other),
    }
}

fn render_items(items: &[Value]) -> String {
    let parts: Vec<String> = items.iter().map(Value::to_string).collect();
    format!("[{}]", parts.join(", "))
}
