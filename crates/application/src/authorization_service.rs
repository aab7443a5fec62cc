use std::sync::Arc;

use tracing::debug;
use vulcan_core::{AppError, AppResult, UserIdentity};
use vulcan_domain::{EffectiveRole, MembershipTarget, Operation, ResourceRef, Role};

use crate::{MembershipRepository, ResourceRepository};

mod hierarchy;

#[cfg(test)]
mod tests;

/// Application service resolving effective roles over the resource hierarchy.
#[derive(Clone)]
pub struct AuthorizationService {
    resources: Arc<dyn ResourceRepository>,
    memberships: Arc<dyn MembershipRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from repository implementations.
    #[must_use]
    pub fn new(
        resources: Arc<dyn ResourceRepository>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            resources,
            memberships,
        }
    }

    /// Computes the actor's effective role on a resource.
    ///
    /// Global admins short-circuit to `Admin`. Otherwise every grant on the
    /// resource and its ancestors is collected and the highest role wins.
    pub async fn effective_role(
        &self,
        actor: &UserIdentity,
        resource: ResourceRef,
    ) -> AppResult<EffectiveRole> {
        if actor.is_global_admin() {
            return Ok(EffectiveRole::granted(Role::Admin));
        }

        let chain = self.resource_chain(resource).await?;
        if chain.is_empty() {
            return Ok(EffectiveRole::none());
        }

        let roles = self
            .memberships
            .list_roles_for_actor(actor.actor_id(), &chain)
            .await?;
        let effective = EffectiveRole::highest(roles);

        debug!(
            actor_id = %actor.actor_id(),
            resource_kind = resource.kind().as_str(),
            resource_id = %resource.id(),
            effective_role = effective.as_str(),
            "resolved effective role"
        );

        Ok(effective)
    }

    /// Ensures the actor's effective role meets the required tier.
    pub async fn authorize(
        &self,
        actor: &UserIdentity,
        resource: ResourceRef,
        required: Role,
    ) -> AppResult<()> {
        let effective = self.effective_role(actor, resource).await?;
        if effective.satisfies(required) {
            return Ok(());
        }

        Err(AppError::not_authorized(
            resource.kind().as_str(),
            format!("act as {required}").as_str(),
        ))
    }

    /// Ensures the actor may perform an operation on a resource.
    pub async fn require_operation(
        &self,
        actor: &UserIdentity,
        resource: ResourceRef,
        operation: Operation,
    ) -> AppResult<()> {
        let effective = self.effective_role(actor, resource).await?;
        if effective.satisfies(operation.required_role()) {
            return Ok(());
        }

        Err(AppError::not_authorized(
            resource.kind().as_str(),
            operation.describe(),
        ))
    }

    /// Ensures the actor holds a direct admin row on exactly this target.
    ///
    /// Grants inherited from a parent project do not count here; only
    /// global admins bypass the row lookup.
    pub async fn require_direct_admin(
        &self,
        actor: &UserIdentity,
        target: MembershipTarget,
    ) -> AppResult<()> {
        if actor.is_global_admin() {
            return Ok(());
        }

        let direct_role = self
            .memberships
            .find_direct_role(target, actor.actor_id())
            .await?;

        if direct_role == Some(Role::Admin) {
            return Ok(());
        }

        Err(AppError::not_authorized(
            target.kind().as_str(),
            Operation::ManageMemberships.describe(),
        ))
    }
}
