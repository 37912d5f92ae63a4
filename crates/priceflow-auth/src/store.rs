//! Persisted key-value state.
//!
//! Values are JSON. The file backend keeps one JSON object per file and
//! rewrites it on every change, so a second process sees updates on its next
//! read.

use crate::AuthError;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A synchronous key-value store for client state.
pub trait PersistentStore: Send + Sync {
    /// Get a value. Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<Value>, AuthError>;

    /// Set a value, replacing any previous one.
    fn set(&self, key: &str, value: Value) -> Result<(), AuthError>;

    /// Delete a value. Returns whether the key existed.
    fn delete(&self, key: &str) -> Result<bool, AuthError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, AuthError> {
        Ok(self.get(key)?.is_some())
    }
}

/// In-memory store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, AuthError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), AuthError> {
        self.entries().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, AuthError> {
        Ok(self.entries().remove(key).is_some())
    }
}

/// Store backed by a JSON object file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Map<String, Value>, AuthError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&contents)? {
            Value::Object(map) => Ok(map),
            other => Err(AuthError::CorruptStore {
                path: self.path.display().to_string(),
                reason: format!("expected an object, found {}", json_kind(&other)),
            }),
        }
    }

    fn write(&self, map: &Map<String, Value>) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistentStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, AuthError> {
        let _guard = self.guard();
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), AuthError> {
        let _guard = self.guard();
        let mut map = self.read()?;
        map.insert(key.to_string(), value);
        self.write(&map)
    }

    fn delete(&self, key: &str) -> Result<bool, AuthError> {
        let _guard = self.guard();
        let mut map = self.read()?;
        if map.remove(key).is_none() {
            return Ok(false);
        }
        self.write(&map)?;
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
    use super::*;
    use serde_json::json;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("priceflow-auth-{}-{}", name, std::process::id()))
            .join("state.json")
    }

    #[test]
    fn test_memory_store_crud() {
        let store = MemoryStore::new();
        assert_eq!(store.get("token").unwrap(), None);

        store.set("token", json!("abc")).unwrap();
        assert!(store.exists("token").unwrap());
        assert_eq!(store.get("token").unwrap(), Some(json!("abc")));

        assert!(store.delete("token").unwrap());
        assert!(!store.delete("token").unwrap());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let path = scratch_path("persist");
        let _ = fs::remove_file(&path);

        FileStore::open(&path).set("token", json!("abc")).unwrap();
        FileStore::open(&path).set("theme", json!("dark")).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("token").unwrap(), Some(json!("abc")));
        assert_eq!(reopened.get("theme").unwrap(), Some(json!("dark")));

        assert!(reopened.delete("token").unwrap());
        assert_eq!(FileStore::open(&path).get("token").unwrap(), None);
        assert_eq!(FileStore::open(&path).get("theme").unwrap(), Some(json!("dark")));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let path = scratch_path("missing");
        let _ = fs::remove_file(&path);

        let store = FileStore::open(&path);
        assert_eq!(store.get("token").unwrap(), None);
        assert!(!store.delete("token").unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_rejects_non_object() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[1, 2]").unwrap();

        let err = FileStore::open(&path).get("token").unwrap_err();
        assert!(err.is_storage_error());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
