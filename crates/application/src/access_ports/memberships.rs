use async_trait::async_trait;
use vulcan_core::{ActorId, AppResult};
use vulcan_domain::{Membership, MembershipId, MembershipTarget, Role};

/// Repository port for membership grants.
///
/// Storage may contain several rows for the same actor and target;
/// callers resolve them by keeping the highest role.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Finds a membership by identifier.
    async fn find_membership(&self, membership_id: MembershipId) -> AppResult<Option<Membership>>;

    /// Returns the highest role of rows matching exactly this target and actor.
    async fn find_direct_role(
        &self,
        target: MembershipTarget,
        actor_id: ActorId,
    ) -> AppResult<Option<Role>>;

    /// Lists roles the actor holds on any of the given targets.
    async fn list_roles_for_actor(
        &self,
        actor_id: ActorId,
        targets: &[MembershipTarget],
    ) -> AppResult<Vec<Role>>;

    /// Lists memberships granted on a target.
    async fn list_for_target(&self, target: MembershipTarget) -> AppResult<Vec<Membership>>;

    /// Persists a new membership.
    ///
    /// Fails with `Conflict` when the actor already holds a grant on the target.
    async fn create_membership(&self, membership: Membership) -> AppResult<Membership>;

    /// Changes the role of a membership.
    async fn update_membership_role(
        &self,
        membership_id: MembershipId,
        role: Role,
    ) -> AppResult<Membership>;

    /// Deletes a membership.
    async fn delete_membership(&self, membership_id: MembershipId) -> AppResult<()>;
}
