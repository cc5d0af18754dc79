//! Text output area shared by the views.

use serde_json::{Map, Value};

/// Accumulated result text, one `key: value` line per payload entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputWindow {
    lines: Vec<String>,
}

impl OutputWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the entries of a flat payload followed by a blank line.
    /// Anything that is not an object is written as a single line.
    pub fn append_result(&mut self, payload: &Value) {
        match payload {
            Value::Object(map) => self.push_pairs(map),
            other => self.push_line(render_value(other)),
        }
        self.push_line(String::new());
    }

    /// Appends one `key: value` line per entry.
    pub fn push_pairs(&mut self, map: &Map<String, Value>) {
        for (key, value) in map {
            self.push_line(format!("{key}: {}", render_value(value)));
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole output, newline separated.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Strings print bare, everything else as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Merges a key-value object, or an array of them, into one object. Later
/// keys win.
pub fn merge_pairs(part: &Value) -> Map<String, Value> {
    match part {
        Value::Object(map) => map.clone(),
        Value::Array(items) => {
            let mut merged = Map::new();
            for item in items {
                if let Value::Object(map) = item {
                    merged.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
            }
            merged
        }
        _ => Map::new(),
    }
}
