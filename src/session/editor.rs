use serde_json::Value;

/// Keeps the editor and the diagram from echoing the same document back and
/// forth: a document is only pushed to the editor when its serialization
/// differs from the last one exchanged.
#[derive(Debug, Default, Clone)]
pub struct EditorSync {
    last: Option<String>,
}

impl EditorSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a document the editor itself emitted.
    pub fn record_emitted(&mut self, json: &Value) {
        self.last = serde_json::to_string(json).ok();
    }

    /// Text to push into the editor for `json`, or `None` when it already shows it.
    pub fn outgoing(&mut self, json: &Value) -> Option<String> {
        let compact = serde_json::to_string(json).ok()?;
        if self.last.as_deref() == Some(compact.as_str()) {
            return None;
        }
        self.last = Some(compact);
        serde_json::to_string_pretty(json).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emitted_document_is_not_echoed() {
        let mut sync = EditorSync::new();
        let doc = json!({"a": 1});
        sync.record_emitted(&doc);
        assert_eq!(sync.outgoing(&doc), None);
    }

    #[test]
    fn test_new_document_is_pushed_once() {
        let mut sync = EditorSync::new();
        let doc = json!({"a": [1, 2]});
        let text = sync.outgoing(&doc).expect("first push");
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), doc);
        assert_eq!(sync.outgoing(&doc), None);
    }
}
