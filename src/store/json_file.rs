use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{Dataset, DocumentStore, StoreResult};

/// Dataset persisted as one pretty-printed JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Staging files must share the target's filesystem for the rename to be atomic
    fn staging_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl DocumentStore for JsonFileStore {
    /// A missing or empty file reads as the seeded document.
    fn read_all(&self) -> StoreResult<Dataset> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Dataset::seeded()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Dataset::seeded());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Writes beside the target and renames over it, so readers never see half a file.
    fn write_all(&self, dataset: &Dataset) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(dataset)?;
        let mut staging = NamedTempFile::new_in(self.staging_dir())?;

        staging.write_all(&json)?;
        staging.as_file().sync_all()?;
        staging.persist(&self.path).map_err(io::Error::from)?;

        debug!(path = %self.path.display(), bytes = json.len(), "Dataset written");
        Ok(())
    }
}
