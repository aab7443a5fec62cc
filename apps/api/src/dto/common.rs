use serde::{Deserialize, Serialize};
use ts_rs::TS;
use vulcan_core::UserIdentity;
use vulcan_domain::{EffectiveRole, ResourceRef};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Incoming payload for the development sign-in.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/bootstrap-request.ts"
)]
pub struct BootstrapRequest {
    pub user_id: String,
    pub token: String,
}

/// API representation of the authenticated user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-identity-response.ts"
)]
pub struct UserIdentityResponse {
    pub user_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub admin: bool,
}

impl From<UserIdentity> for UserIdentityResponse {
    fn from(identity: UserIdentity) -> Self {
        Self {
            user_id: identity.actor_id().to_string(),
            display_name: identity.display_name().to_owned(),
            email: identity.email().map(ToOwned::to_owned),
            admin: identity.is_global_admin(),
        }
    }
}

/// Resolved role of the current user on one resource.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/effective-role-response.ts"
)]
pub struct EffectiveRoleResponse {
    pub resource_kind: String,
    pub resource_id: String,
    /// `null` when the user holds no role on the resource or its ancestors.
    pub role: Option<String>,
}

impl EffectiveRoleResponse {
    #[must_use]
    pub fn new(resource: ResourceRef, effective_role: EffectiveRole) -> Self {
        Self {
            resource_kind: resource.kind().as_str().to_owned(),
            resource_id: resource.id().to_string(),
            role: effective_role.role().map(|role| role.as_str().to_owned()),
        }
    }
}
