use anyhow::Result;
use metronique::session::{ClientStateStore, StateKey};
use metronique::WorkError;
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use crate::config::MetroniqueConfig;

/// Client state kept as one file per key under the config directory.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    root: PathBuf,
}

impl FileStateStore {
    pub fn open() -> Result<Self> {
        Ok(Self::at(MetroniqueConfig::app_dir()?))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, key: StateKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}

fn secure_write(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

impl ClientStateStore for FileStateStore {
    fn get(&self, key: StateKey) -> Result<Option<String>, WorkError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = std::fs::read_to_string(&path)
            .map_err(|e| WorkError::storage(format!("failed to read {}: {e}", path.display())))?;
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(value.to_string()))
    }

    fn set(&mut self, key: StateKey, value: &str) -> Result<(), WorkError> {
        let path = self.path(key);
        secure_write(&path, value)
            .map_err(|e| WorkError::storage(format!("failed to write {}: {e}", path.display())))
    }

    fn remove(&mut self, key: StateKey) -> Result<(), WorkError> {
        let path = self.path(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                WorkError::storage(format!("failed to remove {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }
}
