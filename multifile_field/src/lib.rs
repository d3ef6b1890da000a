//! Multi-file upload form field: one submission can add several files and
//! clear previously uploaded ones. The field reconciles the add list and the
//! remove list against the existing collection, enforces the configured
//! bounds, and applies the outcome through pluggable storage and registry
//! backends.

pub mod error;
pub mod fields;
pub mod forms;
pub mod models;
pub mod multipart;
pub mod policy;
pub mod reconcile;
pub mod storage;

pub use error::{FieldError, Result};
pub use fields::MultiFileField;
pub use forms::MultiFileForm;
pub use models::{FileRecord, PendingUpload, SubmissionPayload, UploadPlan};
pub use multipart::payload_from_multipart;
pub use policy::UploadPolicy;
pub use reconcile::{humanize_bytes, UploadReconciler};
pub use storage::{FileRegistry, FileStorage};
