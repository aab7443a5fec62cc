use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use vulcan_core::UserIdentity;
use vulcan_domain::RuleId;

use crate::dto::{RuleResponse, UpdateRuleRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get_rule_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(rule_id): Path<String>,
) -> ApiResult<Json<RuleResponse>> {
    let rule_id = RuleId::parse(rule_id.as_str())?;
    let rule = state.rule_service.get_rule(&user, rule_id).await?;

    Ok(Json(RuleResponse::from(rule)))
}

pub async fn update_rule_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(rule_id): Path<String>,
    Json(payload): Json<UpdateRuleRequest>,
) -> ApiResult<Json<RuleResponse>> {
    let rule_id = RuleId::parse(rule_id.as_str())?;
    let rule = state
        .rule_service
        .update_rule(&user, rule_id, payload.into())
        .await?;

    Ok(Json(RuleResponse::from(rule)))
}

pub async fn delete_rule_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(rule_id): Path<String>,
) -> ApiResult<StatusCode> {
    let rule_id = RuleId::parse(rule_id.as_str())?;
    state.rule_service.delete_rule(&user, rule_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn unlock_rule_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(rule_id): Path<String>,
) -> ApiResult<Json<RuleResponse>> {
    let rule_id = RuleId::parse(rule_id.as_str())?;
    let rule = state.rule_service.unlock_rule(&user, rule_id).await?;

    Ok(Json(RuleResponse::from(rule)))
}
