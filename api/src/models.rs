//! API Models

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Standard API response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

// ============ Submissions ============

/// Email availability lookup
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmailExistsParams {
    /// Address to look up
    pub email: String,
    /// Record whose own address is ignored (edit forms)
    pub exclude_id: Option<String>,
}

/// Email availability result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmailExistsResponse {
    pub exists: bool,
}
