//! JSON file settings store
//!
//! All named values live in one JSON object. Every write rewrites the whole
//! document into a temp file in the same directory and renames it over the
//! old one, so a crash mid-write leaves the previous document intact.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use calembed_core::ConfigStore;
use calembed_domain::{CalEmbedError, Result};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use crate::errors::InfraError;

/// [`ConfigStore`] persisted as a JSON document
#[derive(Debug)]
pub struct FileConfigStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileConfigStore {
    /// The file is created on first write; a missing file reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(InfraError::from(e).into()),
        };
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&contents).map_err(InfraError::from)? {
            Value::Object(map) => Ok(map),
            other => Err(CalEmbedError::Storage(format!(
                "settings file {} holds {} instead of an object",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(InfraError::from)?;

        let mut staged = NamedTempFile::new_in(&dir).map_err(InfraError::from)?;
        serde_json::to_writer_pretty(&mut staged, document).map_err(InfraError::from)?;
        staged.flush().map_err(InfraError::from)?;
        staged.persist(&self.path).map_err(InfraError::from)?;

        tracing::debug!(path = %self.path.display(), keys = document.len(), "settings persisted");
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn get(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.read_document()?.remove(name))
    }

    async fn set(&self, name: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document()?;
        document.insert(name.to_string(), value);
        self.write_document(&document)
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document()?;
        if document.remove(name).is_none() {
            return Ok(false);
        }
        self.write_document(&document)?;
        Ok(true)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path().join("settings.json"));
        assert_eq!(store.get("anything").await.unwrap(), None);
        assert!(!store.delete("anything").await.unwrap());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let store = FileConfigStore::new(&path);
        store.set("calembed_cache_duration", json!(600)).await.unwrap();
        store.set("calembed_categories", json!([{ "id": "A" }])).await.unwrap();

        let reopened = FileConfigStore::new(&path);
        assert_eq!(reopened.get("calembed_cache_duration").await.unwrap(), Some(json!(600)));
        assert!(reopened.delete("calembed_cache_duration").await.unwrap());
        assert_eq!(store.get("calembed_cache_duration").await.unwrap(), None);
        assert!(store.get("calembed_categories").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path().join("settings.json"));
        store.set("a", json!(1)).await.unwrap();
        store.set("b", json!(2)).await.unwrap();

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn corrupt_document_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileConfigStore::new(&path);
        assert!(matches!(store.get("a").await, Err(CalEmbedError::Storage(_))));

        std::fs::write(&path, "{ broken").unwrap();
        assert!(matches!(store.set("a", json!(1)).await, Err(CalEmbedError::Storage(_))));
        // The broken document was not overwritten
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ broken");
    }
}
