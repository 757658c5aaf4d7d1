use crate::error::PersistenceError;
use crate::utils::fs::write_atomic;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// Durable home of the rendered destination URI.
pub trait DestinationStore: Send + Sync {
    /// `Ok(None)` when nothing was ever written.
    fn read(&self) -> Result<Option<String>, PersistenceError>;

    /// Full replace of the stored URI.
    fn write(&self, uri: &str) -> Result<(), PersistenceError>;
}

/// One-line text file, shared with the streaming service.
#[derive(Debug, Clone)]
pub struct FileDestinationStore {
    path: PathBuf,
}

impl FileDestinationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DestinationStore for FileDestinationStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw.trim().to_string())),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(PersistenceError::Read {
                path: self.path.display().to_string(),
                message: error.to_string(),
            }),
        }
    }

    fn write(&self, uri: &str) -> Result<(), PersistenceError> {
        write_atomic(&self.path, &format!("{}\n", uri.trim())).map_err(|error| {
            PersistenceError::Write {
                path: self.path.display().to_string(),
                message: error.to_string(),
            }
        })
    }
}

#[derive(Debug, Default)]
pub struct MemoryDestinationStore {
    uri: Mutex<Option<String>>,
}

impl MemoryDestinationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Mutex::new(Some(uri.into())),
        }
    }
}

impl DestinationStore for MemoryDestinationStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self
            .uri
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    fn write(&self, uri: &str) -> Result<(), PersistenceError> {
        *self
            .uri
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(uri.trim().to_string());
        Ok(())
    }
}
