//! Key-value persistence for the task collection.
//!
//! The whole collection is written under a single key on every mutation.

use crate::error::StorageError;
use crate::task::{seed_tasks, Task};
use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const TASKS_KEY: &str = "jira-todo-tasks";

pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(self.path_for(key), value).map_err(io_err)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Reads the stored collection. `Ok(None)` means nothing was ever saved.
pub fn read_tasks<S: Storage + ?Sized>(storage: &S) -> Result<Option<Vec<Task>>, StorageError> {
    match storage.get(TASKS_KEY)? {
        Some(data) => Ok(Some(serde_json::from_str(&data)?)),
        None => Ok(None),
    }
}

/// Loads the collection, substituting the seed tasks when storage is empty
/// or unreadable.
pub fn load_tasks<S: Storage + ?Sized>(storage: &S) -> Vec<Task> {
    match read_tasks(storage) {
        Ok(Some(tasks)) => {
            info!(count = tasks.len(), "loaded tasks from storage");
            tasks
        }
        Ok(None) => {
            info!("no saved tasks, starting from seed data");
            seed_tasks(Utc::now())
        }
        Err(err) => {
            error!("Error loading tasks: {err}");
            seed_tasks(Utc::now())
        }
    }
}

pub fn save_tasks<S: Storage + ?Sized>(
    storage: &mut S,
    tasks: &[Task],
) -> Result<(), StorageError> {
    let data = serde_json::to_string(tasks)?;
    storage.set(TASKS_KEY, &data)?;
    debug!(count = tasks.len(), "saved tasks");
    Ok(())
}
