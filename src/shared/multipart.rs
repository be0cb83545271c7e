//! Small helpers for reading multipart form fields in handlers.

use axum::extract::multipart::Field;

use crate::core::error::{AppError, Result};
use crate::modules::storage::UploadedPicture;

/// Read a text field, naming it in the error when the body is malformed
pub async fn text_field(field: Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

/// Read a file field into an uploaded picture, keeping the client file name
/// so the stored copy can reuse its extension
pub async fn picture_field(field: Field<'_>) -> Result<UploadedPicture> {
    let original_name = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "picture".to_string());
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read picture data: {}", e)))?;
    Ok(UploadedPicture {
        original_name,
        data: data.to_vec(),
    })
}
