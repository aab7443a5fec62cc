use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use vulcan_core::UserIdentity;
use vulcan_domain::{ComponentId, MembershipId, MembershipTarget, ProjectId};

use crate::dto::{
    CreateMembershipRequest, MembershipMutationResponse, MembershipResponse,
    UpdateMembershipRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_membership_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateMembershipRequest>,
) -> ApiResult<(StatusCode, Json<MembershipMutationResponse>)> {
    let membership = state
        .membership_service
        .create(&user, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MembershipMutationResponse::created(membership)),
    ))
}

pub async fn update_membership_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(membership_id): Path<String>,
    Json(payload): Json<UpdateMembershipRequest>,
) -> ApiResult<Json<MembershipMutationResponse>> {
    let membership_id = MembershipId::parse(membership_id.as_str())?;
    let membership = state
        .membership_service
        .update(&user, membership_id, payload.into())
        .await?;

    Ok(Json(MembershipMutationResponse::updated(membership)))
}

pub async fn delete_membership_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(membership_id): Path<String>,
) -> ApiResult<Json<MembershipMutationResponse>> {
    let membership_id = MembershipId::parse(membership_id.as_str())?;
    let membership = state
        .membership_service
        .destroy(&user, membership_id)
        .await?;

    Ok(Json(MembershipMutationResponse::removed(membership)))
}

pub async fn list_project_memberships_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<Vec<MembershipResponse>>> {
    let target = MembershipTarget::Project(ProjectId::parse(project_id.as_str())?);

    list_memberships(&state, &user, target).await
}

pub async fn list_component_memberships_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(component_id): Path<String>,
) -> ApiResult<Json<Vec<MembershipResponse>>> {
    let target = MembershipTarget::Component(ComponentId::parse(component_id.as_str())?);

    list_memberships(&state, &user, target).await
}

async fn list_memberships(
    state: &AppState,
    user: &UserIdentity,
    target: MembershipTarget,
) -> ApiResult<Json<Vec<MembershipResponse>>> {
    let memberships = state
        .membership_service
        .list_for_target(user, target)
        .await?
        .into_iter()
        .map(MembershipResponse::from)
        .collect();

    Ok(Json(memberships))
}
