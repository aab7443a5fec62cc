use serde::{Deserialize, Serialize};
use ts_rs::TS;
use vulcan_application::{CreateMembershipInput, UpdateMembershipInput};
use vulcan_domain::Membership;

/// Incoming payload for membership creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-membership-request.ts"
)]
pub struct CreateMembershipRequest {
    /// `Project` or `Component`.
    pub membership_type: String,
    pub membership_id: String,
    pub user_id: String,
    pub role: String,
}

impl From<CreateMembershipRequest> for CreateMembershipInput {
    fn from(value: CreateMembershipRequest) -> Self {
        Self {
            membership_type: value.membership_type,
            membership_id: value.membership_id,
            user_id: value.user_id,
            role: value.role,
        }
    }
}

/// Incoming payload for membership role changes.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-membership-request.ts"
)]
pub struct UpdateMembershipRequest {
    pub role: String,
}

impl From<UpdateMembershipRequest> for UpdateMembershipInput {
    fn from(value: UpdateMembershipRequest) -> Self {
        Self { role: value.role }
    }
}

/// API representation of a membership grant.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/membership-response.ts"
)]
pub struct MembershipResponse {
    pub id: String,
    pub user_id: String,
    pub membership_type: String,
    pub membership_id: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Membership> for MembershipResponse {
    fn from(membership: Membership) -> Self {
        let target = membership.target();
        Self {
            id: membership.id().to_string(),
            user_id: membership.actor_id().to_string(),
            membership_type: target.membership_type().as_str().to_owned(),
            membership_id: target.id().to_string(),
            role: membership.role().as_str().to_owned(),
            created_at: membership.created_at().to_rfc3339(),
            updated_at: membership.updated_at().to_rfc3339(),
        }
    }
}

/// Result of a membership write.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/membership-mutation-response.ts"
)]
pub struct MembershipMutationResponse {
    pub notice: String,
    /// Page of the project or component the membership belongs to.
    pub resource_path: String,
    pub membership: MembershipResponse,
}

impl MembershipMutationResponse {
    #[must_use]
    pub fn created(membership: Membership) -> Self {
        Self::with_notice("Successfully created membership.", membership)
    }

    #[must_use]
    pub fn updated(membership: Membership) -> Self {
        Self::with_notice("Successfully updated membership.", membership)
    }

    #[must_use]
    pub fn removed(membership: Membership) -> Self {
        Self::with_notice("Successfully removed membership.", membership)
    }

    fn with_notice(notice: &str, membership: Membership) -> Self {
        Self {
            notice: notice.to_owned(),
            resource_path: membership.target().resource_path(),
            membership: MembershipResponse::from(membership),
        }
    }
}
