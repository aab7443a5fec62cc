//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_email_service;
mod email_membership_notifier;
mod in_memory_access_repository;
mod postgres_actor_directory;
mod postgres_audit_repository;
mod postgres_membership_repository;
mod postgres_resource_repository;
mod slack_membership_notifier;
mod smtp_email_service;

#[cfg(test)]
mod postgres_test_support;

pub use console_email_service::ConsoleEmailService;
pub use email_membership_notifier::EmailMembershipNotifier;
pub use in_memory_access_repository::InMemoryAccessRepository;
pub use postgres_actor_directory::PostgresActorDirectory;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_membership_repository::PostgresMembershipRepository;
pub use postgres_resource_repository::PostgresResourceRepository;
pub use slack_membership_notifier::{SlackMembershipNotifier, SlackMessage};
pub use smtp_email_service::{SmtpEmailConfig, SmtpEmailService};
