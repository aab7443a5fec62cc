//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod membership;
mod resource;
mod role;
mod rule;
mod security;

pub use membership::{Membership, MembershipEvent};
pub use resource::{
    Component, ComponentId, MembershipId, MembershipTarget, MembershipType, Project, ProjectId,
    ResourceKind, ResourceRef, RuleId,
};
pub use role::{EffectiveRole, Role};
pub use rule::{LockState, Rule, RuleUpdate};
pub use security::{AuditAction, Operation};
