use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;
use vulcan_core::AppError;

mod types;

pub use types::ErrorResponse;

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotAuthorized { .. } => StatusCode::FORBIDDEN,
            AppError::RuleLocked { .. } => StatusCode::LOCKED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed");
        }

        let message = self.0.to_string();
        let payload = match self.0 {
            AppError::InvalidFields(errors) => ErrorResponse::with_errors(message, errors),
            _ => ErrorResponse::new(message),
        };

        (status, Json(payload)).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use vulcan_core::AppError;

    use super::ApiError;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = ApiError::from(error).into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();

        (
            status,
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
        )
    }

    #[tokio::test]
    async fn not_authorized_keeps_resource_message() {
        let (status, body) = body_json(AppError::not_authorized("Component", "manage permissions"))
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["message"],
            "You are not authorized to manage permissions on this Component"
        );
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn invalid_fields_list_each_error() {
        let (status, body) = body_json(AppError::InvalidFields(vec![
            "Role is not included in the list".to_owned(),
        ]))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0], "Role is not included in the list");
    }

    #[tokio::test]
    async fn locked_rule_maps_to_423() {
        let (status, body) = body_json(AppError::RuleLocked {
            rule_id: "SV-242376".to_owned(),
        })
        .await;

        assert_eq!(status, StatusCode::LOCKED);
        assert_eq!(body["message"], "rule 'SV-242376' is locked");
    }
}
