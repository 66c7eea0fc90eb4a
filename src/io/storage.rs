use std::cell::Cell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::io::lock::{LockError, StoreLock};
use crate::model::task::Task;

/// File holding the task collection inside the data directory
pub const TASKS_FILE: &str = "todos.json";

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Error surfaced when a save cannot complete
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not serialize tasks: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error(transparent)]
    LockError(#[from] LockError),
    #[error("{path} could not be read or backed up; refusing to overwrite it")]
    Unreadable { path: PathBuf },
}

/// Why a stored blob could not be turned back into tasks.
/// Never leaves this module as an error: `load` defaults to empty.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path} has unsupported schema version {found}")]
    UnsupportedVersion { path: PathBuf, found: u64 },
}

/// Durable storage for the task collection.
///
/// `load` never fails: absent, empty or unreadable data yields an empty
/// collection. `save` replaces the whole stored collection.
pub trait TaskStorage {
    fn load(&self) -> Vec<Task>;
    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError>;
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    tasks: &'a [Task],
}

/// Encode the collection in the current schema
pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    let mut content = serde_json::to_string_pretty(&DocumentRef {
        version: SCHEMA_VERSION,
        tasks,
    })?;
    content.push('\n');
    Ok(content)
}

/// Decode either the versioned document or the legacy bare array.
/// Blank input is an empty collection; invalid UTF-8 is a parse error.
pub fn decode_tasks(path: &Path, content: &[u8]) -> Result<Vec<Task>, LoadError> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let parse_error = |source| LoadError::ParseError {
        path: path.to_path_buf(),
        source,
    };

    let value: serde_json::Value = serde_json::from_slice(content).map_err(parse_error)?;
    let tasks = match value {
        // Legacy versionless format
        serde_json::Value::Array(_) => serde_json::from_value(value).map_err(parse_error)?,
        serde_json::Value::Object(mut doc) => {
            let version = doc.get("version").and_then(|v| v.as_u64()).unwrap_or(0);
            if version != u64::from(SCHEMA_VERSION) {
                return Err(LoadError::UnsupportedVersion {
                    path: path.to_path_buf(),
                    found: version,
                });
            }
            let tasks = doc.remove("tasks").unwrap_or(serde_json::Value::Null);
            serde_json::from_value(tasks).map_err(parse_error)?
        }
        other => {
            return Err(parse_error(<serde_json::Error as serde::de::Error>::custom(
                format!("expected an object or array, found {}", other),
            )));
        }
    };
    Ok(tasks)
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// `todos.json` in a data directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    data_dir: PathBuf,
    /// Set when the last load hit a file it could neither read nor back up
    unreadable: Cell<bool>,
}

impl JsonFileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        JsonFileStorage {
            data_dir: data_dir.into(),
            unreadable: Cell::new(false),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE)
    }

    /// Load, reporting why the stored data was unusable
    pub fn try_load(&self) -> Result<Vec<Task>, LoadError> {
        let path = self.path();
        let content = match fs::read(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LoadError::ReadError { path, source: e }),
        };
        decode_tasks(&path, &content)
    }

    /// Keep a copy of unusable data before the next save replaces it
    fn back_up(&self) -> io::Result<()> {
        let path = self.path();
        let bak = path.with_extension("json.bak");
        match fs::copy(&path, &bak) {
            Ok(_) => {
                log::warn!("event=tasks_backup path={} status=ok", bak.display());
                Ok(())
            }
            Err(e) => {
                log::error!(
                    "event=tasks_backup path={} status=error error={}",
                    bak.display(),
                    e
                );
                Err(e)
            }
        }
    }
}

impl TaskStorage for JsonFileStorage {
    fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(tasks) => {
                log::debug!("event=tasks_load count={} status=ok", tasks.len());
                self.unreadable.set(false);
                tasks
            }
            Err(e) => {
                log::warn!("event=tasks_load status=defaulted error={}", e);
                // Without a copy, saving would destroy the only one
                self.unreadable.set(self.back_up().is_err());
                Vec::new()
            }
        }
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        if self.unreadable.get() {
            return Err(StorageError::Unreadable { path: self.path() });
        }
        fs::create_dir_all(&self.data_dir).map_err(|e| StorageError::WriteError {
            path: self.data_dir.clone(),
            source: e,
        })?;
        let content = encode_tasks(tasks)?;
        let _lock = StoreLock::acquire_default(&self.data_dir)?;
        let path = self.path();
        atomic_write(&path, content.as_bytes())
            .map_err(|e| StorageError::WriteError { path, source: e })?;
        log::debug!("event=tasks_save count={} status=ok", tasks.len());
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pub tasks: Option<Vec<Task>>,
    /// Number of completed saves
    pub saves: usize,
    /// When set, every save fails
    pub fail_saves: bool,
}

impl MemoryStorage {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        MemoryStorage {
            tasks: Some(tasks),
            ..Default::default()
        }
    }
}

impl TaskStorage for MemoryStorage {
    fn load(&self) -> Vec<Task> {
        self.tasks.clone().unwrap_or_default()
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        if self.fail_saves {
            return Err(StorageError::WriteError {
                path: PathBuf::from("<memory>"),
                source: io::Error::other("saves disabled"),
            });
        }
        self.tasks = Some(tasks.to_vec());
        self.saves += 1;
        Ok(())
    }
}
