use std::sync::Arc;

use sqlx::PgPool;
use vulcan_application::{
    ActorDirectory, AuditRepository, AuthorizationService, MembershipNotifier,
    MembershipRepository, MembershipService, ResourceRepository, RoleUnlockPolicy,
    RuleRepository, RuleService,
};
use vulcan_infrastructure::{
    PostgresActorDirectory, PostgresAuditRepository, PostgresMembershipRepository,
    PostgresResourceRepository,
};

use crate::api_config::ApiConfig;
use crate::state::AppState;

/// Port implementations backing the API services.
#[derive(Clone)]
pub struct AccessRepositories {
    pub resources: Arc<dyn ResourceRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub rules: Arc<dyn RuleRepository>,
    pub actors: Arc<dyn ActorDirectory>,
    pub audit: Arc<dyn AuditRepository>,
}

impl AccessRepositories {
    pub fn postgres(pool: &PgPool) -> Self {
        let resources = Arc::new(PostgresResourceRepository::new(pool.clone()));

        Self {
            resources: resources.clone(),
            memberships: Arc::new(PostgresMembershipRepository::new(pool.clone())),
            rules: resources,
            actors: Arc::new(PostgresActorDirectory::new(pool.clone())),
            audit: Arc::new(PostgresAuditRepository::new(pool.clone())),
        }
    }

    #[cfg(test)]
    pub fn in_memory(repository: Arc<vulcan_infrastructure::InMemoryAccessRepository>) -> Self {
        Self {
            resources: repository.clone(),
            memberships: repository.clone(),
            rules: repository.clone(),
            actors: repository.clone(),
            audit: repository,
        }
    }
}

pub fn build_app_state(
    config: &ApiConfig,
    repositories: AccessRepositories,
    notifiers: Vec<Arc<dyn MembershipNotifier>>,
) -> AppState {
    let authorization_service = AuthorizationService::new(
        repositories.resources.clone(),
        repositories.memberships.clone(),
    );

    let membership_service = notifiers.into_iter().fold(
        MembershipService::new(
            authorization_service.clone(),
            repositories.resources.clone(),
            repositories.memberships,
            repositories.actors.clone(),
            repositories.audit.clone(),
            config.notifications,
        ),
        MembershipService::with_notifier,
    );

    let rule_service = RuleService::new(
        authorization_service.clone(),
        repositories.resources,
        repositories.rules,
        Arc::new(RoleUnlockPolicy::new(
            authorization_service.clone(),
            config.unlock_minimum_role,
        )),
        repositories.audit,
    );

    AppState {
        authorization_service,
        membership_service,
        rule_service,
        actor_directory: repositories.actors,
        frontend_url: config.frontend_url.clone(),
        bootstrap_token: config.bootstrap_token.clone(),
    }
}
