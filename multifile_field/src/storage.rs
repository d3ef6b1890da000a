//! Collaborator contracts: durable bytes and persisted records.
//!
//! The field issues instructions through these traits and never touches the
//! underlying persistence itself. Failures propagate unmodified; whatever
//! transaction boundary the host has is the one that applies.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::FileRecord;

/// Durable byte storage keyed by name.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist `data` under `name` and return the name actually used, which
    /// may differ when the backend renames to avoid collisions.
    async fn save(&self, name: &str, data: &[u8]) -> Result<String>;

    /// Remove stored bytes. Deleting a name that is already gone is not an
    /// error.
    async fn delete(&self, stored_name: &str) -> Result<()>;

    /// Names currently held by the backend.
    async fn list(&self) -> Result<Vec<String>>;
}

/// Persisted collection of file records, addressable by id.
#[async_trait]
pub trait FileRegistry: Send + Sync {
    /// Create and return the record for a freshly stored name.
    async fn create(&self, stored_name: &str) -> Result<FileRecord>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    /// The whole collection, in its stable listing order.
    async fn all(&self) -> Result<Vec<FileRecord>>;

    async fn get(&self, id: Uuid) -> Result<Option<FileRecord>>;
}
