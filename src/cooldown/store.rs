use crate::error::PersistenceError;
use crate::utils::fs::{lock_exclusive, write_atomic};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// The most recent admitted toggle, either polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleEvent {
    pub occurred_at: DateTime<Utc>,
}

impl ToggleEvent {
    pub fn at(occurred_at: DateTime<Utc>) -> Self {
        Self { occurred_at }
    }

    /// Fractional unix seconds, e.g. `1735819200.250000000`.
    pub fn encode(&self) -> String {
        let ts = self.occurred_at;
        format!("{}.{:09}", ts.timestamp(), ts.timestamp_subsec_nanos())
    }

    /// Accepts integer or fractional unix seconds. Anything else is `None`.
    pub fn decode(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Self::decode_float(raw);
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Self::decode_float(raw);
        }

        let secs: i64 = whole.parse().ok()?;
        let mut digits: String = fraction.chars().take(9).collect();
        while digits.len() < 9 {
            digits.push('0');
        }
        let nanos: u32 = digits.parse().ok()?;
        DateTime::from_timestamp(secs, nanos).map(Self::at)
    }

    fn decode_float(raw: &str) -> Option<Self> {
        let value: f64 = raw.parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (secs, nanos) = {
            let secs = value.trunc();
            let nanos = ((value - secs) * 1e9).round().min(999_999_999.0);
            (secs as i64, nanos as u32)
        };
        DateTime::from_timestamp(secs, nanos).map(Self::at)
    }
}

/// What a store holds right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredToggle {
    Absent,
    Present(ToggleEvent),
    /// Present but unreadable; carries the cause.
    Corrupt(String),
}

/// Exclusion held across one read-check-write. Released on drop.
#[derive(Debug)]
pub struct StoreLock {
    _file: Option<File>,
}

impl StoreLock {
    /// For stores no other process can see.
    pub fn process_local() -> Self {
        Self { _file: None }
    }
}

/// Durable single-slot register for the last admitted toggle.
pub trait ToggleStore: Send + Sync {
    fn load(&self) -> StoredToggle;

    /// Full replace. Must not leave a partially written value behind.
    fn save(&self, event: &ToggleEvent) -> Result<(), PersistenceError>;

    /// Excludes every other writer of the same state, including other
    /// processes, until the returned lock is dropped.
    fn lock(&self) -> Result<StoreLock, PersistenceError> {
        Ok(StoreLock::process_local())
    }
}

/// Stores the timestamp as text in a single file.
#[derive(Debug, Clone)]
pub struct FileToggleStore {
    path: PathBuf,
}

impl FileToggleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ToggleStore for FileToggleStore {
    fn load(&self) -> StoredToggle {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match ToggleEvent::decode(&raw) {
                Some(event) => StoredToggle::Present(event),
                None => StoredToggle::Corrupt(format!(
                    "unparsable timestamp {:?} in {}",
                    raw.trim(),
                    self.path.display()
                )),
            },
            Err(error) if error.kind() == ErrorKind::NotFound => StoredToggle::Absent,
            Err(error) => {
                StoredToggle::Corrupt(format!("cannot read {}: {error}", self.path.display()))
            }
        }
    }

    fn save(&self, event: &ToggleEvent) -> Result<(), PersistenceError> {
        write_atomic(&self.path, &event.encode()).map_err(|error| PersistenceError::Write {
            path: self.path.display().to_string(),
            message: error.to_string(),
        })
    }

    fn lock(&self) -> Result<StoreLock, PersistenceError> {
        let file = lock_exclusive(&self.path).map_err(|error| PersistenceError::Lock {
            path: self.path.display().to_string(),
            message: error.to_string(),
        })?;
        Ok(StoreLock { _file: Some(file) })
    }
}

/// Process-local store. Keeps the encoded text so corrupt content can be
/// represented as well.
#[derive(Debug, Default)]
pub struct MemoryToggleStore {
    raw: Mutex<Option<String>>,
}

impl MemoryToggleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }
}

impl ToggleStore for MemoryToggleStore {
    fn load(&self) -> StoredToggle {
        let raw = self
            .raw
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match raw.as_deref() {
            None => StoredToggle::Absent,
            Some(text) => ToggleEvent::decode(text).map_or_else(
                || StoredToggle::Corrupt(format!("unparsable timestamp {text:?}")),
                StoredToggle::Present,
            ),
        }
    }

    fn save(&self, event: &ToggleEvent) -> Result<(), PersistenceError> {
        *self
            .raw
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(event.encode());
        Ok(())
    }
}
