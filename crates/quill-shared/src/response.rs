//! Response envelopes for errors and bare acknowledgements.

use serde::{Deserialize, Serialize};

/// Error body: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    // Common error constructors
    pub fn validation_failed() -> Self {
        Self::new("Validation failed")
    }

    pub fn unauthorized() -> Self {
        Self::new("Unauthorized")
    }

    pub fn forbidden() -> Self {
        Self::new("Forbidden")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal Server Error")
    }
}

/// Acknowledgement body: `{"success": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
