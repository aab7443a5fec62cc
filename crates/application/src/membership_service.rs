use std::sync::Arc;

use vulcan_core::{AppResult, UserIdentity};
use vulcan_domain::{Membership, MembershipTarget, Operation};

use crate::{
    ActorDirectory, AuditRepository, AuthorizationService, MembershipNotifier,
    MembershipRepository, NotificationSettings, ResourceRepository,
};

mod dispatch;
mod lifecycle;


/// Raw create parameters as received from the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateMembershipInput {
    /// Target type discriminator, `Project` or `Component`.
    pub membership_type: String,
    /// Target identifier.
    pub membership_id: String,
    /// Identifier of the user receiving the grant.
    pub user_id: String,
    /// Role to grant.
    pub role: String,
}

/// Raw update parameters as received from the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateMembershipInput {
    /// Replacement role.
    pub role: String,
}

/// Application service managing the membership lifecycle.
#[derive(Clone)]
pub struct MembershipService {
    authorization_service: AuthorizationService,
    resources: Arc<dyn ResourceRepository>,
    memberships: Arc<dyn MembershipRepository>,
    actors: Arc<dyn ActorDirectory>,
    audit_repository: Arc<dyn AuditRepository>,
    notifiers: Vec<Arc<dyn MembershipNotifier>>,
    settings: NotificationSettings,
}

impl MembershipService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        resources: Arc<dyn ResourceRepository>,
        memberships: Arc<dyn MembershipRepository>,
        actors: Arc<dyn ActorDirectory>,
        audit_repository: Arc<dyn AuditRepository>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            authorization_service,
            resources,
            memberships,
            actors,
            audit_repository,
            notifiers: Vec::new(),
            settings,
        }
    }

    /// Registers a notifier; it only fires when its channel is enabled.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn MembershipNotifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    /// Lists memberships granted on a project or component.
    pub async fn list_for_target(
        &self,
        actor: &UserIdentity,
        target: MembershipTarget,
    ) -> AppResult<Vec<Membership>> {
        self.authorization_service
            .require_operation(actor, target.into(), Operation::ViewResource)
            .await?;

        let mut memberships = self.memberships.list_for_target(target).await?;
        memberships.sort_by(|left, right| {
            right
                .role()
                .cmp(&left.role())
                .then_with(|| left.created_at().cmp(&right.created_at()))
        });

        Ok(memberships)
    }
}
