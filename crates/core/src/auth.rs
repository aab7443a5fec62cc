use serde::{Deserialize, Serialize};

use crate::ActorId;

/// Actor information persisted in the authenticated session.
///
/// The identity is immutable for the lifetime of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    actor_id: ActorId,
    display_name: String,
    email: Option<String>,
    is_global_admin: bool,
}

impl UserIdentity {
    /// Creates an actor identity from authentication data.
    #[must_use]
    pub fn new(
        actor_id: ActorId,
        display_name: impl Into<String>,
        email: Option<String>,
        is_global_admin: bool,
    ) -> Self {
        Self {
            actor_id,
            display_name: display_name.into(),
            email,
            is_global_admin,
        }
    }

    /// Returns the stable actor identifier.
    #[must_use]
    pub fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    /// Returns the display name for the current actor.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns whether the actor holds the global admin flag.
    #[must_use]
    pub fn is_global_admin(&self) -> bool {
        self.is_global_admin
    }
}
