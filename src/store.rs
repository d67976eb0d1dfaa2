//! Persistence binding for the task sequence.
//!
//! The whole sequence lives in a single JSON blob under [`TASKS_KEY`] in a
//! [`BlobStore`]. It is read once at startup and overwritten in full after every
//! mutation; there is no diffing and no schema version.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::task::Task;

/// Key under which the task sequence is stored.
pub const TASKS_KEY: &str = "tasks";

/// Synchronous string-keyed blob storage.
pub trait BlobStore {
    /// Read the blob at `key`, `None` if nothing has been written yet.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob at `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Blob store keeping one `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileBlobStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Atomic-ish write via temp + rename.
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(value.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

/// In-process blob store. Writes can be made to fail to simulate a full disk.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: std::collections::HashMap<String, String>,
    fail_writes: bool,
}

#[cfg(test)]
impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.blobs.insert(key.to_string(), value.to_string());
        store
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

#[cfg(test)]
impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::Other, "storage quota exceeded").into());
        }
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load the saved task sequence, starting fresh if it is absent or unreadable.
pub fn hydrate<S: BlobStore + ?Sized>(store: &S) -> Vec<Task> {
    let raw = match store.get(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "error reading saved tasks, starting fresh");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Option<Vec<Task>>>(&raw) {
        Ok(tasks) => tasks.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "error parsing saved tasks, starting fresh");
            Vec::new()
        }
    }
}

/// Overwrite the stored blob with the full task sequence.
pub fn persist<S: BlobStore + ?Sized>(store: &mut S, tasks: &[Task]) -> Result<()> {
    let data = serde_json::to_string_pretty(tasks)?;
    store.set(TASKS_KEY, &data)?;
    debug!(count = tasks.len(), "persisted tasks");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Vec<Task> {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let mut done = Task::new(1_704_067_200_000, "Pay rent", d("2024-01-01"));
        done.completed = true;
        vec![done, Task::new(1_704_067_200_001, "Buy milk", d("2024-01-10"))]
    }

    #[test]
    fn hydrate_absent_blob_is_empty() {
        assert!(hydrate(&MemoryBlobStore::new()).is_empty());
    }

    #[test]
    fn hydrate_corrupt_blob_is_empty() {
        for raw in ["not json", "{\"tasks\": 1}", "[{\"id\":\"x\"}]", ""] {
            let store = MemoryBlobStore::with_blob(TASKS_KEY, raw);
            assert!(hydrate(&store).is_empty(), "expected empty for {raw:?}");
        }
    }

    #[test]
    fn hydrate_null_blob_is_empty() {
        let store = MemoryBlobStore::with_blob(TASKS_KEY, "null");
        assert!(hydrate(&store).is_empty());
    }

    #[test]
    fn persist_then_hydrate_round_trips() {
        let mut store = MemoryBlobStore::new();
        let tasks = sample();
        persist(&mut store, &tasks).unwrap();
        assert_eq!(hydrate(&store), tasks);
    }

    #[test]
    fn reads_blob_written_by_browser_version() {
        let raw = r#"[{"id":1704067200000,"name":"Buy milk","dueDate":"2024-01-10","completed":false}]"#;
        let tasks = hydrate(&MemoryBlobStore::with_blob(TASKS_KEY, raw));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 1_704_067_200_000);
        assert_eq!(tasks[0].name, "Buy milk");
    }

    #[test]
    fn failed_write_is_reported() {
        let mut store = MemoryBlobStore::new();
        store.set_fail_writes(true);
        assert!(persist(&mut store, &sample()).is_err());
        assert!(store.raw(TASKS_KEY).is_none());
    }

    #[test]
    fn file_store_round_trips_and_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::new(dir.path().join("nested"));
        assert!(hydrate(&store).is_empty());

        let tasks = sample();
        persist(&mut store, &tasks).unwrap();
        assert!(store.path_for(TASKS_KEY).exists());
        assert!(!store.path_for(TASKS_KEY).with_extension("json.tmp").exists());
        assert_eq!(hydrate(&FileBlobStore::new(store.dir())), tasks);
    }

    #[test]
    fn persisting_empty_sequence_writes_empty_array() {
        let mut store = MemoryBlobStore::new();
        persist(&mut store, &[]).unwrap();
        assert_eq!(store.raw(TASKS_KEY), Some("[]"));
    }
}
