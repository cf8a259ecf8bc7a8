use crate::api::{JsonmapError, parse_document};
use crate::fs::FileSystem;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Polls a document file for changes by modification time.
#[derive(Debug)]
pub struct DocumentWatcher {
    path: PathBuf,
    last_modified: Option<SystemTime>,
}

impl DocumentWatcher {
    /// Start watching `path`; its current contents count as already seen.
    pub fn new(path: PathBuf, fs: &dyn FileSystem) -> Self {
        let last_modified = fs.modified(&path).ok();
        Self {
            path,
            last_modified,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The re-parsed document when the file changed since the last poll.
    ///
    /// A file that changed but does not parse is reported once as an error and
    /// then treated as seen, so the next valid save is picked up again.
    pub fn poll(&mut self, fs: &dyn FileSystem) -> Result<Option<Value>, JsonmapError> {
        let modified = fs.modified(&self.path)?;
        if self.last_modified == Some(modified) {
            return Ok(None);
        }
        self.last_modified = Some(modified);

        let content = fs.read_to_string(&self.path)?;
        parse_document(&content, &self.path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;
    use serde_json::json;

    #[test]
    fn test_poll_reports_only_changes() {
        let fs = MockFs::with_files([("/doc.json", "{\"a\": 1}")]);
        let mut watcher = DocumentWatcher::new(PathBuf::from("/doc.json"), &fs);
        assert_eq!(watcher.poll(&fs).unwrap(), None);

        fs.write(Path::new("/doc.json"), "{\"a\": 2}").unwrap();
        assert_eq!(watcher.poll(&fs).unwrap(), Some(json!({"a": 2})));
        assert_eq!(watcher.poll(&fs).unwrap(), None);
    }

    #[test]
    fn test_invalid_save_is_reported_once() {
        let fs = MockFs::with_files([("/doc.json", "{}")]);
        let mut watcher = DocumentWatcher::new(PathBuf::from("/doc.json"), &fs);

        fs.write(Path::new("/doc.json"), "{oops").unwrap();
        assert!(matches!(watcher.poll(&fs), Err(JsonmapError::Parse { .. })));
        assert_eq!(watcher.poll(&fs).unwrap(), None);

        fs.write(Path::new("/doc.json"), "[]").unwrap();
        assert_eq!(watcher.poll(&fs).unwrap(), Some(json!([])));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let fs = MockFs::new();
        let mut watcher = DocumentWatcher::new(PathBuf::from("/gone.json"), &fs);
        assert!(matches!(watcher.poll(&fs), Err(JsonmapError::Io(_))));
    }
}
