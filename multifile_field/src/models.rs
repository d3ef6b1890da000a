use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stored file. Owned by the registry; the field only reads these and
/// asks for creation or deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    /// Base name used for storage lookup and delete.
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// One file submitted in the current request. Lives for the duration of one
/// reconciliation and is never persisted directly; storage turns it into a
/// `FileRecord`.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub name: String,
    pub data: Vec<u8>,
}

impl PendingUpload {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Everything one form submission asked for: files to add and record ids to
/// remove. `None` upload entries are the empty file inputs browsers submit
/// alongside the filled ones.
#[derive(Debug, Clone, Default)]
pub struct SubmissionPayload {
    pub uploads: Vec<Option<PendingUpload>>,
    /// Removal ids stay strings until matched against records; garbage ids
    /// simply never match.
    pub remove_ids: Vec<String>,
}

impl SubmissionPayload {
    /// Record one file input. An input with no filename and no bytes is kept
    /// as a placeholder so it can be ignored when counting.
    pub fn push_file(&mut self, filename: Option<String>, data: Vec<u8>) {
        match filename {
            Some(name) if !name.is_empty() || !data.is_empty() => {
                self.uploads.push(Some(PendingUpload::new(name, data)));
            }
            _ => self.uploads.push(None),
        }
    }

    /// Record one removal id. Blank values are dropped.
    pub fn push_remove_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !id.is_empty() {
            self.remove_ids.push(id);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.uploads.iter().all(Option::is_none) && self.remove_ids.is_empty()
    }
}

/// Instructions produced by a successful reconciliation. The caller applies
/// `delete_ids` and `additions` against its collaborators; `retained` is the
/// surviving part of the existing listing, in its original order.
#[derive(Debug, Default)]
pub struct UploadPlan {
    pub retained: Vec<FileRecord>,
    pub delete_ids: Vec<Uuid>,
    pub additions: Vec<PendingUpload>,
}

impl UploadPlan {
    /// Collection size once the plan is applied.
    pub fn projected_total(&self) -> usize {
        self.retained.len() + self.additions.len()
    }
}
