//! Durable key-value slots. Each slot holds one serialized value and every
//! write replaces the whole value.

mod file;
mod memory;

use std::{path::PathBuf, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid slot key {0:?}")]
    InvalidKey(String),
    #[error("unknown store backend {0:?} (expected `file` or `memory`)")]
    UnknownBackend(String),
    #[error("slot file {path} could not be accessed")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal slot storage used by the tip board.
pub trait KeyValueStore {
    /// Returns the raw value of `key`, or `None` when the slot was never written
    /// or has been removed.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Removing a missing slot is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// Store handle picked at runtime from [`StoreSettings`].
pub type DynStore = Box<dyn KeyValueStore + Send + Sync>;

/// Slot keys become file names, so only a conservative alphabet is accepted.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    File,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(StoreError::UnknownBackend(other.to_string())),
        }
    }
}

/// Environment-driven storage settings.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".bote")
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl StoreSettings {
    pub fn new(backend: StoreBackend, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            data_dir: data_dir.into(),
        }
    }

    /// Reads `BOTE_STORE` and `BOTE_DATA_DIR`, falling back to defaults.
    pub fn from_env() -> StoreResult<Self> {
        let backend = match std::env::var("BOTE_STORE") {
            Ok(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => StoreBackend::default(),
        };
        let data_dir = std::env::var("BOTE_DATA_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        Ok(Self { backend, data_dir })
    }

    pub fn open(&self) -> StoreResult<DynStore> {
        match self.backend {
            StoreBackend::File => {
                tracing::debug!(dir = %self.data_dir.display(), "opening file store");
                Ok(Box::new(FileStore::open(&self.data_dir)?))
            }
            StoreBackend::Memory => {
                tracing::warn!("memory store selected; state is lost on exit");
                Ok(Box::new(MemoryStore::default()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_restricted_to_file_safe_names() {
        assert!(validate_key("listaEmpleados").is_ok());
        assert!(validate_key("bote-guardado_2").is_ok());
        assert!(matches!(validate_key(""), Err(StoreError::InvalidKey(_))));
        assert!(matches!(
            validate_key("../etc"),
            Err(StoreError::InvalidKey(_))
        ));
    }

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!(" file ".parse::<StoreBackend>().unwrap(), StoreBackend::File);
        let err = "redis".parse::<StoreBackend>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown store backend \"redis\" (expected `file` or `memory`)"
        );
    }

    #[test]
    fn settings_open_memory_backend() {
        let settings = StoreSettings::new(StoreBackend::Memory, "unused");
        let mut store = settings.open().unwrap();
        store.set("slot", "1").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("1"));
    }
}
