//! Resource hierarchy: projects contain components, components contain rules.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vulcan_core::{AppError, AppResult, NonEmptyString};

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID value.
            #[must_use]
            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Parses an identifier from its transport representation.
            pub fn parse(value: &str) -> AppResult<Self> {
                Uuid::parse_str(value.trim()).map(Self).map_err(|error| {
                    AppError::Validation(format!(
                        concat!("invalid ", $label, " id '{}': {}"),
                        value, error
                    ))
                })
            }

            /// Returns the underlying UUID value.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

resource_id!(
    /// Identifier of a project.
    ProjectId,
    "project"
);
resource_id!(
    /// Identifier of a component.
    ComponentId,
    "component"
);
resource_id!(
    /// Identifier of a rule.
    RuleId,
    "rule"
);
resource_id!(
    /// Identifier of a membership grant.
    MembershipId,
    "membership"
);

/// Resource kinds participating in access control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Top-level container of components.
    Project,
    /// Benchmark component owned by a project.
    Component,
    /// Individual control owned by a component.
    Rule,
}

impl ResourceKind {
    /// Returns the stable storage and display value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Component => "Component",
            Self::Rule => "Rule",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Reference to any resource in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum ResourceRef {
    /// A project reference.
    Project(ProjectId),
    /// A component reference.
    Component(ComponentId),
    /// A rule reference.
    Rule(RuleId),
}

impl ResourceRef {
    /// Returns the resource kind.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Project(_) => ResourceKind::Project,
            Self::Component(_) => ResourceKind::Component,
            Self::Rule(_) => ResourceKind::Rule,
        }
    }

    /// Returns the identifier as a UUID regardless of kind.
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Project(id) => id.as_uuid(),
            Self::Component(id) => id.as_uuid(),
            Self::Rule(id) => id.as_uuid(),
        }
    }
}

impl From<MembershipTarget> for ResourceRef {
    fn from(value: MembershipTarget) -> Self {
        match value {
            MembershipTarget::Project(id) => Self::Project(id),
            MembershipTarget::Component(id) => Self::Component(id),
        }
    }
}

/// Resource that can carry membership grants.
///
/// Rules never carry grants; they inherit from their component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "membership_type", content = "membership_id")]
pub enum MembershipTarget {
    /// Grant scoped to a project and everything under it.
    Project(ProjectId),
    /// Grant scoped to a component and its rules.
    Component(ComponentId),
}

impl MembershipTarget {
    /// Builds a target from the transport type discriminator and id.
    pub fn from_transport(membership_type: &str, membership_id: &str) -> AppResult<Self> {
        match MembershipType::from_str(membership_type)? {
            MembershipType::Project => ProjectId::parse(membership_id).map(Self::Project),
            MembershipType::Component => ComponentId::parse(membership_id).map(Self::Component),
        }
    }

    /// Returns the type discriminator of the target.
    #[must_use]
    pub fn membership_type(&self) -> MembershipType {
        match self {
            Self::Project(_) => MembershipType::Project,
            Self::Component(_) => MembershipType::Component,
        }
    }

    /// Returns the resource kind of the target.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Project(_) => ResourceKind::Project,
            Self::Component(_) => ResourceKind::Component,
        }
    }

    /// Returns the identifier as a UUID regardless of kind.
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Project(id) => id.as_uuid(),
            Self::Component(id) => id.as_uuid(),
        }
    }

    /// Returns the canonical path of the target resource.
    #[must_use]
    pub fn resource_path(&self) -> String {
        match self {
            Self::Project(id) => format!("/projects/{id}"),
            Self::Component(id) => format!("/components/{id}"),
        }
    }
}

/// Type discriminator for membership targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipType {
    /// Project membership.
    Project,
    /// Component membership.
    Component,
}

impl MembershipType {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Component => "Component",
        }
    }

    /// Returns the lowercase label used in notification names.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Component => "component",
        }
    }
}

impl FromStr for MembershipType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Project" => Ok(Self::Project),
            "Component" => Ok(Self::Component),
            _ => Err(AppError::Validation(format!(
                "membership type must be 'Project' or 'Component', got '{value}'"
            ))),
        }
    }
}

/// Project resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: NonEmptyString,
}

impl Project {
    /// Creates a validated project.
    pub fn new(id: ProjectId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }
}

/// Component resource, owned by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    id: ComponentId,
    project_id: ProjectId,
    name: NonEmptyString,
}

impl Component {
    /// Creates a validated component.
    pub fn new(id: ComponentId, project_id: ProjectId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            project_id,
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the component identifier.
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the component name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::{ComponentId, MembershipTarget, MembershipType, ProjectId, ResourceKind};

    #[test]
    fn membership_target_parses_transport_values() {
        let project_id = ProjectId::new();
        let target = MembershipTarget::from_transport("Project", &project_id.to_string());
        assert_eq!(target.ok(), Some(MembershipTarget::Project(project_id)));
    }

    #[test]
    fn membership_target_rejects_rule_type() {
        let result = MembershipTarget::from_transport("Rule", &ComponentId::new().to_string());
        assert!(result.is_err());
    }

    #[test]
    fn membership_target_rejects_malformed_id() {
        let result = MembershipTarget::from_transport("Component", "42");
        assert!(result.is_err());
    }

    #[test]
    fn resource_path_follows_target_kind() {
        let component_id = ComponentId::new();
        let target = MembershipTarget::Component(component_id);
        assert_eq!(target.resource_path(), format!("/components/{component_id}"));
        assert_eq!(target.kind(), ResourceKind::Component);
        assert_eq!(target.membership_type(), MembershipType::Component);
    }
}
