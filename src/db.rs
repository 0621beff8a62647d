use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::MEMORY_DATA_FILE;
use crate::store::{DocumentStore, JsonFileStore, MemoryStore};

/// Opens the document store named by `data_file` and makes sure it is writable.
pub fn init_store(data_file: &str) -> anyhow::Result<Arc<dyn DocumentStore>> {
    if data_file == MEMORY_DATA_FILE {
        info!("Using in-memory store, data is lost on shutdown");
        return Ok(Arc::new(MemoryStore::seeded()));
    }

    let store = JsonFileStore::new(data_file);
    let dataset = store
        .read_all()
        .with_context(|| format!("Failed to read data file {data_file}"))?;
    store
        .write_all(&dataset)
        .with_context(|| format!("Failed to write data file {data_file}"))?;

    info!(
        path = %store.path().display(),
        users = dataset.users.len(),
        attendance = dataset.attendance_records.len(),
        leaves = dataset.leave_requests.len(),
        "Data file ready"
    );
    Ok(Arc::new(store))
}
