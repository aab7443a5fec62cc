//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod authorization_service;
mod membership_service;
mod rule_service;
mod unlock_policy;

#[cfg(test)]
mod test_support;

pub use access_ports::{
    ActorDirectory, ActorProfile, AuditEvent, AuditRepository, EmailService,
    MembershipNotification, MembershipNotifier, MembershipRepository, NotificationChannel,
    NotificationSettings, ResourceRepository, RuleRepository, UnlockPolicy,
};
pub use authorization_service::AuthorizationService;
pub use membership_service::{CreateMembershipInput, MembershipService, UpdateMembershipInput};
pub use rule_service::RuleService;
pub use unlock_policy::RoleUnlockPolicy;
