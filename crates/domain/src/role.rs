use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vulcan_core::AppError;

/// Membership roles in ascending order of privilege.
///
/// The derived ordering is the authorization ordering: a role satisfies
/// every requirement at or below its own tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Read-only access to the resource and its children.
    Viewer,
    /// Regular member allowed to author rule content.
    Author,
    /// Member allowed to review and unlock rules.
    Reviewer,
    /// Full control including membership administration.
    Admin,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Author => "author",
            Self::Reviewer => "reviewer",
            Self::Admin => "admin",
        }
    }

    /// Returns all roles, lowest first.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::Viewer, Role::Author, Role::Reviewer, Role::Admin];

        ALL
    }

    /// Parses a transport value into a role.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value.trim())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "viewer" => Ok(Self::Viewer),
            // `member` is the historical name of the baseline editing tier.
            "author" | "member" => Ok(Self::Author),
            "reviewer" => Ok(Self::Reviewer),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Role resolved for an actor on a resource after inheritance.
///
/// `EffectiveRole::none()` sorts below every granted role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectiveRole(Option<Role>);

impl EffectiveRole {
    /// Effective role of an actor with no grant at all.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Effective role backed by a concrete grant.
    #[must_use]
    pub const fn granted(role: Role) -> Self {
        Self(Some(role))
    }

    /// Combines grants by keeping the highest role found.
    #[must_use]
    pub fn highest(roles: impl IntoIterator<Item = Role>) -> Self {
        Self(roles.into_iter().max())
    }

    /// Returns the underlying role, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.0
    }

    /// Returns whether this effective role meets a required tier.
    #[must_use]
    pub fn satisfies(&self, required: Role) -> bool {
        self.0.is_some_and(|role| role >= required)
    }

    /// Returns the stable label used by transport payloads.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0.map_or("none", |role| role.as_str())
    }
}

impl From<Role> for EffectiveRole {
    fn from(value: Role) -> Self {
        Self::granted(value)
    }
}
