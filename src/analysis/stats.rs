use super::depth::max_depth;
use serde::Serialize;
use serde_json::Value;

/// Read-only document metrics for the stats display.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DocumentStats {
    /// Nesting depth, root = 1.
    pub max_depth: usize,
    /// Objects and arrays anywhere in the document, root included.
    pub node_count: usize,
    /// Object keys anywhere in the document.
    pub property_count: usize,
    /// Length of the compact serialization in bytes.
    pub byte_size: usize,
}

impl DocumentStats {
    pub fn from_document(json: &Value) -> Self {
        let (node_count, property_count) = count(json);
        let byte_size = serde_json::to_string(json).map(|s| s.len()).unwrap_or(0);

        Self {
            max_depth: max_depth(json),
            node_count,
            property_count,
            byte_size,
        }
    }

    pub fn formatted_size(&self) -> String {
        format_size(self.byte_size)
    }
}

fn count(value: &Value) -> (usize, usize) {
    match value {
        Value::Object(map) => map.values().fold((1, map.len()), |(n, p), v| {
            let (cn, cp) = count(v);
            (n + cn, p + cp)
        }),
        Value::Array(items) => items.iter().fold((1, 0), |(n, p), v| {
            let (cn, cp) = count(v);
            (n + cn, p + cp)
        }),
        _ => (0, 0),
    }
}

/// `"N bytes"` below one kilobyte, otherwise kilobytes with two decimals.
pub fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    }
}
