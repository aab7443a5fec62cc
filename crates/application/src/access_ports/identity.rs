use async_trait::async_trait;
use vulcan_core::{ActorId, AppResult, UserIdentity};
use vulcan_domain::Rule;

/// Directory projection of a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorProfile {
    /// Actor identifier.
    pub actor_id: ActorId,
    /// Display name.
    pub display_name: String,
    /// Contact email, when known.
    pub email: Option<String>,
    /// Global admin flag.
    pub is_global_admin: bool,
}

impl ActorProfile {
    /// Converts the profile into a request identity.
    #[must_use]
    pub fn into_identity(self) -> UserIdentity {
        UserIdentity::new(
            self.actor_id,
            self.display_name,
            self.email,
            self.is_global_admin,
        )
    }
}

/// Port for resolving user accounts known to the identity provider.
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// Finds an actor by identifier.
    async fn find_actor(&self, actor_id: ActorId) -> AppResult<Option<ActorProfile>>;
}

/// Port deciding the elevated unlock capability on rules.
#[async_trait]
pub trait UnlockPolicy: Send + Sync {
    /// Returns whether the actor may unlock the rule.
    async fn can_unlock(&self, actor: &UserIdentity, rule: &Rule) -> AppResult<bool>;
}
