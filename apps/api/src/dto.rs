mod common;
mod memberships;
mod rules;

pub use common::{BootstrapRequest, EffectiveRoleResponse, HealthResponse, UserIdentityResponse};
pub use memberships::{
    CreateMembershipRequest, MembershipMutationResponse, MembershipResponse,
    UpdateMembershipRequest,
};
pub use rules::{RuleResponse, UpdateRuleRequest};

#[cfg(test)]
mod tests {
    use super::{
        BootstrapRequest, CreateMembershipRequest, EffectiveRoleResponse, HealthResponse,
        MembershipMutationResponse, MembershipResponse, RuleResponse, UpdateMembershipRequest,
        UpdateRuleRequest, UserIdentityResponse,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        BootstrapRequest::export(&config)?;
        CreateMembershipRequest::export(&config)?;
        UpdateMembershipRequest::export(&config)?;
        UpdateRuleRequest::export(&config)?;
        MembershipResponse::export(&config)?;
        MembershipMutationResponse::export(&config)?;
        RuleResponse::export(&config)?;
        EffectiveRoleResponse::export(&config)?;
        ErrorResponse::export(&config)?;
        HealthResponse::export(&config)?;
        UserIdentityResponse::export(&config)?;

        Ok(())
    }
}
