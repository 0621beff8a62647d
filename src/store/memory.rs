use std::sync::Mutex;

use super::{Dataset, DocumentStore, StoreError, StoreResult};

/// Dataset kept in process memory; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    dataset: Mutex<Dataset>,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Mutex::new(dataset),
        }
    }

    pub fn seeded() -> Self {
        Self::new(Dataset::seeded())
    }
}

impl DocumentStore for MemoryStore {
    fn read_all(&self) -> StoreResult<Dataset> {
        let guard = self.dataset.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn write_all(&self, dataset: &Dataset) -> StoreResult<()> {
        let mut guard = self.dataset.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = dataset.clone();
        Ok(())
    }
}
