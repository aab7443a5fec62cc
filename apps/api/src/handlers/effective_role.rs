//! Read-only probes exposing the resolved role of the signed-in user.

use axum::Json;
use axum::extract::{Extension, Path, State};
use vulcan_core::UserIdentity;
use vulcan_domain::{ComponentId, ProjectId, ResourceRef, RuleId};

use crate::dto::EffectiveRoleResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn project_effective_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<EffectiveRoleResponse>> {
    let resource = ResourceRef::Project(ProjectId::parse(project_id.as_str())?);

    effective_role(&state, &user, resource).await
}

pub async fn component_effective_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(component_id): Path<String>,
) -> ApiResult<Json<EffectiveRoleResponse>> {
    let resource = ResourceRef::Component(ComponentId::parse(component_id.as_str())?);

    effective_role(&state, &user, resource).await
}

pub async fn rule_effective_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(rule_id): Path<String>,
) -> ApiResult<Json<EffectiveRoleResponse>> {
    let resource = ResourceRef::Rule(RuleId::parse(rule_id.as_str())?);

    effective_role(&state, &user, resource).await
}

async fn effective_role(
    state: &AppState,
    user: &UserIdentity,
    resource: ResourceRef,
) -> ApiResult<Json<EffectiveRoleResponse>> {
    let effective_role = state
        .authorization_service
        .effective_role(user, resource)
        .await?;

    Ok(Json(EffectiveRoleResponse::new(resource, effective_role)))
}
