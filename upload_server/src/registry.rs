//! In-memory record registry for the demo host.

use std::sync::Arc;

use async_trait::async_trait;
use multifile_field::{FileRecord, FileRegistry, Result};
use parking_lot::RwLock;
use uuid::Uuid;

/// Keeps records in insertion order behind one lock. Writes across racing
/// submissions serialize here; the last one wins.
#[derive(Clone, Default)]
pub struct MemoryRegistry {
    records: Arc<RwLock<Vec<FileRecord>>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRegistry for MemoryRegistry {
    async fn create(&self, stored_name: &str) -> Result<FileRecord> {
        let record = FileRecord::new(stored_name);
        self.records.write().push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.records.write().retain(|record| record.id != id);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<FileRecord>> {
        Ok(self.records.read().clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<FileRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }
}
