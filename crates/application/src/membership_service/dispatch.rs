use tracing::warn;
use vulcan_core::UserIdentity;
use vulcan_domain::{Membership, MembershipEvent};

use crate::MembershipNotification;

use super::MembershipService;

impl MembershipService {
    /// Fans a lifecycle event out to the enabled notifiers.
    ///
    /// Delivery failures are logged and never reach the caller.
    pub(super) async fn dispatch(
        &self,
        event: MembershipEvent,
        membership: &Membership,
        performed_by: &UserIdentity,
    ) {
        let channels: Vec<_> = self
            .notifiers
            .iter()
            .filter(|notifier| {
                let channel = notifier.channel();
                self.settings.is_enabled(channel) && channel.handles(event)
            })
            .collect();

        if channels.is_empty() {
            return;
        }

        let member = match self.actors.find_actor(membership.actor_id()).await {
            Ok(member) => member,
            Err(error) => {
                warn!(
                    membership_id = %membership.id(),
                    %error,
                    "failed to resolve member for notification"
                );
                None
            }
        };

        let notification = MembershipNotification {
            event,
            membership: membership.clone(),
            performed_by: performed_by.clone(),
            member,
        };

        for notifier in channels {
            if let Err(error) = notifier.notify(&notification).await {
                warn!(
                    event = event.as_str(),
                    channel = ?notifier.channel(),
                    membership_id = %membership.id(),
                    %error,
                    "membership notification failed"
                );
            }
        }
    }
}
