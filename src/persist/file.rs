//! File-backed snapshot store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Snapshot, SnapshotStore};
use crate::core::error::PersistError;

/// On-disk encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotFormat {
    /// Pretty-printed JSON, readable and hand-editable.
    #[default]
    Json,
    /// Compact bincode.
    Bincode,
}

impl SnapshotFormat {
    /// Pick a format from a file extension: `.bin` is bincode, anything else JSON.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => SnapshotFormat::Bincode,
            _ => SnapshotFormat::Json,
        }
    }

    pub fn encode(self, snapshot: &Snapshot) -> Result<Vec<u8>, PersistError> {
        Ok(match self {
            SnapshotFormat::Json => serde_json::to_vec_pretty(snapshot)?,
            SnapshotFormat::Bincode => bincode::serialize(snapshot)?,
        })
    }

    pub fn decode(self, bytes: &[u8]) -> Result<Snapshot, PersistError> {
        Ok(match self {
            SnapshotFormat::Json => serde_json::from_slice(bytes)?,
            SnapshotFormat::Bincode => bincode::deserialize(bytes)?,
        })
    }
}

/// Stores the snapshot in one file.
///
/// Saves write a sibling temp file and rename it over the target, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    format: SnapshotFormat,
}

impl FileStore {
    /// Store at `path`, format chosen by extension.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = SnapshotFormat::for_path(&path);
        Self { path, format }
    }

    #[must_use]
    pub fn with_format(mut self, format: SnapshotFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for FileStore {
    fn load(&mut self) -> Result<Snapshot, PersistError> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                debug!(path = %self.path.display(), bytes = bytes.len(), "loading snapshot");
                self.format.decode(&bytes)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot yet, starting empty");
                Ok(Snapshot::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let bytes = self.format.encode(snapshot)?;
        let temp = self.temp_path();
        fs::write(&temp, &bytes)?;
        fs::rename(&temp, &self.path)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "saved snapshot");
        Ok(())
    }
}
