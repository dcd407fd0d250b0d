//! Whole-file JSON mirror of the conversation store.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::memory::record::ConversationRecord;

/// Errors raised while reading or writing the mirror file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File system error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The file content is not a valid record array.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for mirror operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Destination the conversation store mirrors itself to.
pub trait RecordMirror: Send + Sync {
    /// Read back the previously saved records.
    ///
    /// # Errors
    /// Returns an error if the stored state cannot be read or parsed.
    fn load(&self) -> PersistenceResult<Vec<ConversationRecord>>;

    /// Overwrite the stored state with `records`.
    ///
    /// # Errors
    /// Returns an error if the state cannot be written.
    fn save(&self, records: &[ConversationRecord]) -> PersistenceResult<()>;
}

/// Mirror backed by a single pretty-printed JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileMirror {
    path: PathBuf,
}

impl JsonFileMirror {
    /// Mirror to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the mirror file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordMirror for JsonFileMirror {
    fn load(&self) -> PersistenceResult<Vec<ConversationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, records: &[ConversationRecord]) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Mirror that keeps nothing; used when persistence is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMirror;

impl RecordMirror for NoMirror {
    fn load(&self) -> PersistenceResult<Vec<ConversationRecord>> {
        Ok(Vec::new())
    }

    fn save(&self, _records: &[ConversationRecord]) -> PersistenceResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{RecordId, SessionId};
    use chrono::Utc;

    fn sample() -> ConversationRecord {
        ConversationRecord {
            id: RecordId::new(),
            timestamp: Utc::now(),
            user_message: "hello".to_string(),
            ai_response: String::new(),
            context: None,
            session_id: SessionId::new(),
            tool_outputs: None,
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mirror = JsonFileMirror::new(dir.path().join("absent.json"));
        assert!(mirror.load().expect("load").is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mirror = JsonFileMirror::new(dir.path().join("nested").join("memory.json"));
        let records = vec![sample(), sample()];

        mirror.save(&records).expect("save");
        let loaded = mirror.load().expect("load");
        assert_eq!(loaded, records);

        let raw = fs::read_to_string(mirror.path()).expect("read");
        assert!(raw.starts_with("[\n  {"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("memory.json");
        fs::write(&path, "{ not json").expect("write");
        let mirror = JsonFileMirror::new(path);
        assert!(matches!(
            mirror.load(),
            Err(PersistenceError::Serialization(_))
        ));
    }

    #[test]
    fn test_loads_file_from_earlier_versions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("memory.json");
        fs::write(
            &path,
            r#"[{"id":"x8f2k","timestamp":"2025-01-04T18:22:10.000Z","userMessage":"Suggest a meal","aiResponse":"","context":"Type: meal","sessionId":"q7w1z"}]"#,
        )
        .expect("write");

        let loaded = JsonFileMirror::new(path).load().expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id.as_str(), "x8f2k");
        assert!(loaded[0].tool_outputs.is_none());
    }
}
