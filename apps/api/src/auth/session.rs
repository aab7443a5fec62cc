use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use tower_sessions::Session;
use tracing::info;
use vulcan_core::{AppError, UserIdentity};

use crate::dto::UserIdentityResponse;
use crate::error::ApiResult;

use super::SESSION_USER_KEY;

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    let actor_id = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .map(|identity| identity.actor_id());

    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    if let Some(actor_id) = actor_id {
        info!(actor_id = %actor_id, "logout");
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<UserIdentityResponse>> {
    Ok(Json(UserIdentityResponse::from(user)))
}
