use serde::{Deserialize, Serialize};

use crate::Role;

/// Operations gated by the authorization service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Reading a resource or listing its members.
    ViewResource,
    /// Editing rule content.
    EditRule,
    /// Deleting a rule.
    DeleteRule,
    /// Updating or removing membership grants.
    ManageMemberships,
}

impl Operation {
    /// Returns the minimum effective role the operation requires.
    #[must_use]
    pub fn required_role(&self) -> Role {
        match self {
            Self::ViewResource => Role::Viewer,
            Self::EditRule | Self::DeleteRule => Role::Author,
            Self::ManageMemberships => Role::Admin,
        }
    }

    /// Returns the phrase used in rejection messages.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::ViewResource => "view",
            Self::EditRule => "edit rules",
            Self::DeleteRule => "delete rules",
            Self::ManageMemberships => "manage permissions",
        }
    }
}

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a membership is created.
    MembershipCreated,
    /// Emitted when a membership role changes.
    MembershipUpdated,
    /// Emitted when a membership is removed.
    MembershipRemoved,
    /// Emitted when rule content is updated.
    RuleUpdated,
    /// Emitted when a rule is deleted.
    RuleDeleted,
    /// Emitted when a rule is unlocked.
    RuleUnlocked,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MembershipCreated => "membership.created",
            Self::MembershipUpdated => "membership.updated",
            Self::MembershipRemoved => "membership.removed",
            Self::RuleUpdated => "rule.updated",
            Self::RuleDeleted => "rule.deleted",
            Self::RuleUnlocked => "rule.unlocked",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Role;

    use super::Operation;

    #[test]
    fn membership_management_requires_admin() {
        assert_eq!(Operation::ManageMemberships.required_role(), Role::Admin);
    }

    #[test]
    fn viewing_requires_lowest_tier() {
        assert_eq!(Operation::ViewResource.required_role(), Role::Viewer);
    }
}
