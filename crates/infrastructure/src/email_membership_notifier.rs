use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use vulcan_application::{
    EmailService, MembershipNotification, MembershipNotifier, NotificationChannel,
};
use vulcan_core::AppResult;

/// Sends the welcome email to users added to a project or component.
///
/// The body is plain text; user-controlled names are never rendered as markup.
pub struct EmailMembershipNotifier {
    email_service: Arc<dyn EmailService>,
    app_url: String,
}

impl EmailMembershipNotifier {
    /// Creates a notifier linking recipients to `app_url`.
    #[must_use]
    pub fn new(email_service: Arc<dyn EmailService>, app_url: impl Into<String>) -> Self {
        Self {
            email_service,
            app_url: app_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl MembershipNotifier for EmailMembershipNotifier {
    fn channel(&self) -> NotificationChannel {
        NotificationChannel::Email
    }

    async fn notify(&self, notification: &MembershipNotification) -> AppResult<()> {
        let Some(recipient) = notification
            .member
            .as_ref()
            .and_then(|member| member.email.as_deref())
        else {
            debug!(
                membership_id = %notification.membership.id(),
                "member has no email address, skipping welcome email"
            );
            return Ok(());
        };

        let target = notification.membership.target();
        let label = target.membership_type().label();
        let link = format!("{}{}", self.app_url, target.resource_path());
        let subject = format!("Vulcan: you have been added to a {label}");
        let text_body = format!(
            "{} added you to a {label} with the '{}' role.\n\nOpen it at {link}\n",
            notification.performed_by.display_name(),
            notification.membership.role(),
        );
        self.email_service
            .send_email(
                recipient,
                subject.as_str(),
                text_body.as_str(),
                None,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use vulcan_application::{
        ActorProfile, EmailService, MembershipNotification, MembershipNotifier,
    };
    use vulcan_core::{ActorId, AppResult, UserIdentity};
    use vulcan_domain::{Membership, MembershipEvent, MembershipTarget, ProjectId, Role};

    use super::EmailMembershipNotifier;

    #[derive(Default)]
    struct RecordingEmailService {
        sent: Mutex<Vec<(String, String, String, Option<String>)>>,
    }

    #[async_trait]
    impl EmailService for RecordingEmailService {
        async fn send_email(
            &self,
            to: &str,
            subject: &str,
            text_body: &str,
            html_body: Option<&str>,
        ) -> AppResult<()> {
            self.sent.lock().await.push((
                to.to_owned(),
                subject.to_owned(),
                text_body.to_owned(),
                html_body.map(str::to_owned),
            ));
            Ok(())
        }
    }

    fn notification(email: Option<&str>) -> (MembershipNotification, ProjectId) {
        let project_id = ProjectId::new();
        let member_id = ActorId::new();
        let notification = MembershipNotification {
            event: MembershipEvent::Created,
            membership: Membership::new(member_id, MembershipTarget::Project(project_id), Role::Author),
            performed_by: UserIdentity::new(ActorId::new(), "Ada Admin", None, false),
            member: Some(ActorProfile {
                actor_id: member_id,
                display_name: "Max Member".to_owned(),
                email: email.map(str::to_owned),
                is_global_admin: false,
            }),
        };

        (notification, project_id)
    }

    #[tokio::test]
    async fn sends_welcome_email_with_resource_link() {
        let email_service = Arc::new(RecordingEmailService::default());
        let notifier = EmailMembershipNotifier::new(email_service.clone(), "https://vulcan.test/");
        let (notification, project_id) = notification(Some("max@example.com"));

        assert!(notifier.notify(&notification).await.is_ok());

        let sent = email_service.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "max@example.com");
        assert_eq!(sent[0].1, "Vulcan: you have been added to a project");
        assert!(
            sent[0]
                .2
                .contains(format!("https://vulcan.test/projects/{project_id}").as_str())
        );
    }

    #[tokio::test]
    async fn performer_name_is_sent_as_plain_text_only() {
        let email_service = Arc::new(RecordingEmailService::default());
        let notifier = EmailMembershipNotifier::new(email_service.clone(), "https://vulcan.test");
        let (mut notification, _) = notification(Some("max@example.com"));
        notification.performed_by = UserIdentity::new(
            ActorId::new(),
            "<script>alert(1)</script>",
            None,
            false,
        );

        assert!(notifier.notify(&notification).await.is_ok());

        let sent = email_service.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].2.starts_with("<script>alert(1)</script> added you"));
        assert_eq!(sent[0].3, None);
    }

    #[tokio::test]
    async fn skips_members_without_email() {
        let email_service = Arc::new(RecordingEmailService::default());
        let notifier = EmailMembershipNotifier::new(email_service.clone(), "https://vulcan.test");
        let (notification, _) = notification(None);

        assert!(notifier.notify(&notification).await.is_ok());
        assert!(email_service.sent.lock().await.is_empty());
    }
}
