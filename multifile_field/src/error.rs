//! Field error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::reconcile::humanize_bytes;

pub type Result<T> = std::result::Result<T, FieldError>;

fn humanized(nbytes: &u64) -> String {
    humanize_bytes(*nbytes)
}

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("No less than {min} files uploaded at a time, please (received {received}).")]
    TooFewFiles { min: usize, received: usize },

    #[error("No more than {max} files uploaded at a time, please (received {received}).")]
    TooManyFiles { max: usize, received: usize },

    #[error("File {filename} exceeds maximum upload size of {}.", humanized(.max_size))]
    FileTooLarge { filename: String, max_size: u64 },

    #[error("At least one file must be uploaded.")]
    NothingUploaded,

    #[error("No more than {max} files in total, please (attempted {attempted}).")]
    TooManyTotal { max: usize, attempted: usize },

    #[error("Field cannot process uploads without {0} configured")]
    MissingConfiguration(&'static str),

    #[error("Malformed submission payload: {0}")]
    Malformed(String),

    /// For storage backends whose failures are not plain IO errors.
    #[error("Storage error: {0}")]
    Storage(String),

    /// For registry backends whose failures are not plain IO errors.
    #[error("Registry error: {0}")]
    Registry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FieldError {
    /// Whether this is a submission-validation failure whose message is meant
    /// to be shown back on the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FieldError::TooFewFiles { .. }
                | FieldError::TooManyFiles { .. }
                | FieldError::FileTooLarge { .. }
                | FieldError::NothingUploaded
                | FieldError::TooManyTotal { .. }
        )
    }
}

impl IntoResponse for FieldError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            FieldError::Malformed(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            FieldError::MissingConfiguration(what) => {
                tracing::error!("Field misconfigured: missing {}", what);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            FieldError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
            FieldError::Registry(msg) => {
                tracing::error!("Registry error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Registry error".to_string())
            }
            FieldError::Io(err) => {
                tracing::error!("IO error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            _ => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
