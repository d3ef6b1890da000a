//! The composite multi-file upload field.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{FieldError, Result};
use crate::models::{FileRecord, SubmissionPayload};
use crate::policy::UploadPolicy;
use crate::reconcile::UploadReconciler;
use crate::storage::{FileRegistry, FileStorage};

/// A form field that accepts several file inputs plus removal checkboxes in
/// one submission and persists the outcome through its collaborators.
///
/// A field without collaborators can still validate payloads; processing
/// needs both storage and registry wired in.
#[derive(Clone)]
pub struct MultiFileField {
    reconciler: UploadReconciler,
    storage: Option<Arc<dyn FileStorage>>,
    registry: Option<Arc<dyn FileRegistry>>,
}

impl MultiFileField {
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            reconciler: UploadReconciler::new(policy),
            storage: None,
            registry: None,
        }
    }

    pub fn with_storage(mut self, storage: Arc<dyn FileStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_registry(mut self, registry: Arc<dyn FileRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn policy(&self) -> &UploadPolicy {
        self.reconciler.policy()
    }

    async fn existing(&self) -> Result<Vec<FileRecord>> {
        match &self.registry {
            Some(registry) => registry.all().await,
            None => Ok(Vec::new()),
        }
    }

    /// Run the submission through validation against the current collection
    /// without applying anything.
    pub async fn validate(&self, payload: &SubmissionPayload) -> Result<()> {
        let existing = self.existing().await?;
        self.reconciler.reconcile(&existing, payload.clone()).map(|_| ())
    }

    /// Validate, then apply: deletions first (bytes, then record), then
    /// additions (bytes, then record). Returns the resulting listing in
    /// existing order with new records appended in submission order.
    ///
    /// The apply phase has no transaction. A collaborator failure propagates
    /// as-is and already-applied sub-operations stay applied.
    pub async fn process(&self, payload: SubmissionPayload) -> Result<Vec<FileRecord>> {
        let storage = self
            .storage
            .clone()
            .ok_or(FieldError::MissingConfiguration("storage"))?;
        let registry = self
            .registry
            .clone()
            .ok_or(FieldError::MissingConfiguration("registry"))?;

        let existing = registry.all().await?;
        let plan = self.reconciler.reconcile(&existing, payload)?;
        debug!(
            existing = existing.len(),
            removing = plan.delete_ids.len(),
            adding = plan.additions.len(),
            "applying reconciled submission"
        );

        for id in &plan.delete_ids {
            if let Some(record) = registry.get(*id).await? {
                storage.delete(&record.filename).await?;
                registry.delete(*id).await?;
            }
        }

        let mut listing = plan.retained;
        for upload in plan.additions {
            let stored_name = storage.save(&upload.name, &upload.data).await?;
            let record = registry.create(&stored_name).await?;
            listing.push(record);
        }

        info!(total = listing.len(), "file set reconciled");
        Ok(listing)
    }
}
