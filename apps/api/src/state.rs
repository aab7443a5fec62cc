use std::sync::Arc;

use vulcan_application::{ActorDirectory, AuthorizationService, MembershipService, RuleService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub membership_service: MembershipService,
    pub rule_service: RuleService,
    pub actor_directory: Arc<dyn ActorDirectory>,
    pub frontend_url: String,
    pub bootstrap_token: String,
}
