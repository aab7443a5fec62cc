use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vulcan_core::ActorId;

use crate::{MembershipId, MembershipTarget, MembershipType, Role};

/// Role grant of one actor on a project or component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    id: MembershipId,
    actor_id: ActorId,
    target: MembershipTarget,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Membership {
    /// Creates a fresh membership with a new identifier.
    #[must_use]
    pub fn new(actor_id: ActorId, target: MembershipTarget, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: MembershipId::new(),
            actor_id,
            target,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a membership from persisted values.
    #[must_use]
    pub fn from_parts(
        id: MembershipId,
        actor_id: ActorId,
        target: MembershipTarget,
        role: Role,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            actor_id,
            target,
            role,
            created_at,
            updated_at,
        }
    }

    /// Returns the membership identifier.
    #[must_use]
    pub fn id(&self) -> MembershipId {
        self.id
    }

    /// Returns the actor holding the grant.
    #[must_use]
    pub fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    /// Returns the granted resource.
    #[must_use]
    pub fn target(&self) -> MembershipTarget {
        self.target
    }

    /// Returns the granted role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a copy carrying a new role.
    #[must_use]
    pub fn with_role(&self, role: Role) -> Self {
        Self {
            role,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

/// Lifecycle transitions of a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipEvent {
    /// A grant was created.
    Created,
    /// A grant's role changed.
    Updated,
    /// A grant was deleted.
    Removed,
}

impl MembershipEvent {
    /// Returns the stable event name, for example `membership.created`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "membership.created",
            Self::Updated => "membership.updated",
            Self::Removed => "membership.removed",
        }
    }

    /// Returns the chat notification name for a membership type,
    /// for example `create_project_membership`.
    #[must_use]
    pub fn notification_name(&self, membership_type: MembershipType) -> String {
        let verb = match self {
            Self::Created => "create",
            Self::Updated => "update",
            Self::Removed => "remove",
        };
        format!("{verb}_{}_membership", membership_type.label())
    }
}
