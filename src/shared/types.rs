use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response envelope used by every JSON endpoint.
///
/// `data` is omitted entirely for responses that carry no payload
/// (deletes, contact submissions).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Either "success" or "error"
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}
