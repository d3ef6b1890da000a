//! Pulling a field's submission out of a multipart form body.

use axum::extract::Multipart;

use crate::error::{FieldError, Result};
use crate::models::SubmissionPayload;

/// Collect the parts belonging to `field_name` from a multipart submission.
///
/// The composite field renders as two inputs: `{name}_0` carries file
/// uploads, `{name}_1` carries removal ids. Parts belonging to other form
/// fields are left untouched for whoever reads them next.
pub async fn payload_from_multipart(
    field_name: &str,
    multipart: &mut Multipart,
) -> Result<SubmissionPayload> {
    let uploads_part = format!("{field_name}_0");
    let removals_part = format!("{field_name}_1");

    let mut payload = SubmissionPayload::default();

    while let Some(part) = multipart.next_field().await.map_err(|e| {
        FieldError::Malformed(format!("failed to read multipart field: {e}"))
    })? {
        let Some(name) = part.name().map(str::to_string) else {
            continue;
        };

        if name == uploads_part {
            let filename = part.file_name().map(str::to_string);
            let data = part.bytes().await.map_err(|e| {
                FieldError::Malformed(format!("failed to read file data: {e}"))
            })?;
            payload.push_file(filename, data.to_vec());
        } else if name == removals_part {
            let id = part.text().await.map_err(|e| {
                FieldError::Malformed(format!("failed to read removal id: {e}"))
            })?;
            payload.push_remove_id(id);
        }
    }

    Ok(payload)
}
