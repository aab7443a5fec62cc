use async_trait::async_trait;
use vulcan_core::{AppResult, UserIdentity};
use vulcan_domain::{ResourceRef, Role, Rule};

use crate::{AuthorizationService, UnlockPolicy};

/// Unlock policy granting the capability by effective role.
///
/// Global admins always qualify through the resolver short-circuit.
#[derive(Clone)]
pub struct RoleUnlockPolicy {
    authorization_service: AuthorizationService,
    minimum_role: Role,
}

impl RoleUnlockPolicy {
    /// Default tier allowed to unlock rules.
    pub const DEFAULT_MINIMUM_ROLE: Role = Role::Reviewer;

    /// Creates a policy with an explicit minimum role.
    #[must_use]
    pub fn new(authorization_service: AuthorizationService, minimum_role: Role) -> Self {
        Self {
            authorization_service,
            minimum_role,
        }
    }

    /// Returns the configured minimum role.
    #[must_use]
    pub fn minimum_role(&self) -> Role {
        self.minimum_role
    }
}

#[async_trait]
impl UnlockPolicy for RoleUnlockPolicy {
    async fn can_unlock(&self, actor: &UserIdentity, rule: &Rule) -> AppResult<bool> {
        let effective = self
            .authorization_service
            .effective_role(actor, ResourceRef::Rule(rule.id()))
            .await?;

        Ok(effective.satisfies(self.minimum_role))
    }
}
