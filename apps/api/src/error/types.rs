use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
    /// Field-level messages for rejected writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub(super) fn new(message: String) -> Self {
        Self {
            message,
            errors: None,
        }
    }

    pub(super) fn with_errors(message: String, errors: Vec<String>) -> Self {
        Self {
            message,
            errors: Some(errors),
        }
    }
}
