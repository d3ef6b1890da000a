//! Add/remove reconciliation over an existing file collection.

use std::collections::HashSet;

use crate::error::{FieldError, Result};
use crate::models::{FileRecord, SubmissionPayload, UploadPlan};
use crate::policy::UploadPolicy;

const SIZE_SUFFIXES: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Render a byte count against the unit picked by decimal magnitude, scaled
/// by powers of 1024, with trailing zeros stripped: "5 MB", "1.5 KB".
///
/// Zero has no magnitude and clamps to the smallest unit.
pub fn humanize_bytes(nbytes: u64) -> String {
    let rank = if nbytes == 0 {
        0
    } else {
        (((nbytes as f64).log10() / 3.0) as usize).min(SIZE_SUFFIXES.len() - 1)
    };
    let scaled = nbytes as f64 / 1024f64.powi(rank as i32);
    let formatted = format!("{scaled:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    format!("{} {}", trimmed, SIZE_SUFFIXES[rank])
}

/// Decides what one submission does to an existing collection.
///
/// Pure decision logic over already-deserialized inputs: no I/O, stateless
/// between calls. Checks run in a fixed order and the first failure wins, so
/// a rejected submission has produced no mutation instructions at all.
#[derive(Debug, Clone)]
pub struct UploadReconciler {
    policy: UploadPolicy,
}

impl UploadReconciler {
    pub fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Validate the submission against `existing` and produce the plan.
    ///
    /// Removal ids that match no record are no-ops, never errors. Matching
    /// walks `existing`, so duplicate ids in the request remove a record
    /// once and the retained listing keeps its original order.
    pub fn reconcile(
        &self,
        existing: &[FileRecord],
        payload: SubmissionPayload,
    ) -> Result<UploadPlan> {
        let SubmissionPayload {
            uploads,
            remove_ids,
        } = payload;

        let additions: Vec<_> = uploads.into_iter().flatten().collect();

        if additions.len() < self.policy.min_files {
            return Err(FieldError::TooFewFiles {
                min: self.policy.min_files,
                received: additions.len(),
            });
        }

        if let Some(max) = self.policy.max_files {
            if additions.len() > max {
                return Err(FieldError::TooManyFiles {
                    max,
                    received: additions.len(),
                });
            }
        }

        for upload in &additions {
            if upload.size() > self.policy.max_file_size {
                return Err(FieldError::FileTooLarge {
                    filename: upload.name.clone(),
                    max_size: self.policy.max_file_size,
                });
            }
        }

        let remove_set: HashSet<&str> = remove_ids.iter().map(String::as_str).collect();
        let (removed, retained): (Vec<_>, Vec<_>) = existing
            .iter()
            .cloned()
            .partition(|record| remove_set.contains(record.id.to_string().as_str()));

        if removed.len() < remove_set.len() {
            tracing::debug!(
                unmatched = remove_set.len() - removed.len(),
                "ignoring removal ids with no matching record"
            );
        }

        let projected_total = retained.len() + additions.len();

        if self.policy.required && projected_total == 0 {
            return Err(FieldError::NothingUploaded);
        }

        if let Some(max) = self.policy.max_total {
            if projected_total > max {
                return Err(FieldError::TooManyTotal {
                    max,
                    attempted: projected_total,
                });
            }
        }

        Ok(UploadPlan {
            delete_ids: removed.into_iter().map(|record| record.id).collect(),
            retained,
            additions,
        })
    }
}
