use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tower_sessions::Session;
use tracing::{info, warn};
use vulcan_core::{ActorId, AppError};

use crate::dto::BootstrapRequest;
use crate::error::ApiResult;
use crate::state::AppState;

use super::{SESSION_CREATED_AT_KEY, SESSION_USER_KEY};

/// Signs in as an existing user with the shared bootstrap token.
pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    if payload.token != state.bootstrap_token {
        warn!("bootstrap login rejected: invalid token");
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let actor_id = ActorId::parse(payload.user_id.as_str())?;
    let identity = state
        .actor_directory
        .find_actor(actor_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("unknown user '{actor_id}'")))?
        .into_identity();

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    session
        .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session creation time: {error}"))
        })?;

    info!(
        actor_id = %identity.actor_id(),
        global_admin = identity.is_global_admin(),
        "bootstrap login"
    );

    Ok(StatusCode::NO_CONTENT)
}
