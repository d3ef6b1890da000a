use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_FILES: usize = 5;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Bounds applied to one submission and to the resulting collection.
///
/// `max_files` caps uploads per submission; `max_total` caps the collection
/// after removals and additions are applied. The two are independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// Fewest uploads a single submission may carry.
    pub min_files: usize,
    /// Most uploads a single submission may carry; `None` for unbounded.
    pub max_files: Option<usize>,
    /// Largest accepted upload, in bytes.
    pub max_file_size: u64,
    /// Cap on the whole collection after the submission applies.
    pub max_total: Option<usize>,
    /// Reject submissions that would leave the collection empty.
    pub required: bool,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            min_files: 0,
            max_files: Some(DEFAULT_MAX_FILES),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_total: None,
            required: false,
        }
    }
}
