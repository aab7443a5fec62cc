mod audit;
mod identity;
mod memberships;
mod notifications;
mod resources;
mod rules;

pub use audit::{AuditEvent, AuditRepository};
pub use identity::{ActorDirectory, ActorProfile, UnlockPolicy};
pub use memberships::MembershipRepository;
pub use notifications::{
    EmailService, MembershipNotification, MembershipNotifier, NotificationChannel,
    NotificationSettings,
};
pub use resources::ResourceRepository;
pub use rules::RuleRepository;
