//! Form-level plumbing for forms carrying one or more multi-file fields.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::fields::MultiFileField;
use crate::models::{FileRecord, SubmissionPayload};

/// Mix-in for form types that own [`MultiFileField`]s: implement
/// [`upload_fields`](MultiFileForm::upload_fields) and whole-form processing
/// comes for free.
#[async_trait]
pub trait MultiFileForm {
    /// The form's multi-file fields, keyed by their submission names.
    fn upload_fields(&self) -> Vec<(&str, &MultiFileField)>;

    /// Process every declared field against its payload entry. A field with
    /// no entry is treated as an empty submission; the first field error
    /// aborts the whole form.
    async fn process_uploads(
        &self,
        mut payloads: HashMap<String, SubmissionPayload>,
    ) -> Result<HashMap<String, Vec<FileRecord>>> {
        let mut processed = HashMap::new();
        for (name, field) in self.upload_fields() {
            let payload = payloads.remove(name).unwrap_or_default();
            let listing = field.process(payload).await?;
            processed.insert(name.to_string(), listing);
        }
        Ok(processed)
    }
}
