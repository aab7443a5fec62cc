use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use vulcan_core::{ActorId, AppError, AppResult, UserIdentity};
use vulcan_domain::{
    Component, ComponentId, Membership, MembershipId, MembershipTarget, Project, ProjectId, Role,
    Rule, RuleId,
};

use crate::{
    ActorDirectory, ActorProfile, AuditEvent, AuditRepository, AuthorizationService,
    MembershipNotification, MembershipNotifier, MembershipRepository, NotificationChannel,
    ResourceRepository, RuleRepository,
};

#[derive(Default)]
pub(crate) struct FakeAccessStore {
    pub projects: Mutex<HashMap<ProjectId, Project>>,
    pub components: Mutex<HashMap<ComponentId, Component>>,
    pub rules: Mutex<HashMap<RuleId, Rule>>,
    pub memberships: Mutex<Vec<Membership>>,
    pub actors: Mutex<HashMap<ActorId, ActorProfile>>,
}

impl FakeAccessStore {
    pub async fn add_project(&self) -> ProjectId {
        let project_id = ProjectId::new();
        let project = Project::new(project_id, "RHEL 9 STIG");
        if let Ok(project) = project {
            self.projects.lock().await.insert(project_id, project);
        }
        project_id
    }

    pub async fn add_component(&self, project_id: ProjectId) -> ComponentId {
        let component_id = ComponentId::new();
        let component = Component::new(component_id, project_id, "Audit");
        if let Ok(component) = component {
            self.components.lock().await.insert(component_id, component);
        }
        component_id
    }

    pub async fn add_rule(&self, component_id: ComponentId, locked: bool) -> RuleId {
        let rule_id = RuleId::new();
        let rule = Rule::from_parts(
            rule_id,
            component_id,
            "SV-230221",
            "Audit logins",
            None,
            None,
            locked,
        );
        if let Ok(rule) = rule {
            self.rules.lock().await.insert(rule_id, rule);
        }
        rule_id
    }

    pub async fn add_actor(&self, is_global_admin: bool) -> UserIdentity {
        let actor_id = ActorId::new();
        let profile = ActorProfile {
            actor_id,
            display_name: format!("user-{actor_id}"),
            email: Some(format!("{actor_id}@example.com")),
            is_global_admin,
        };
        self.actors.lock().await.insert(actor_id, profile.clone());
        profile.into_identity()
    }

    pub async fn grant(&self, actor: &UserIdentity, target: MembershipTarget, role: Role) {
        self.memberships
            .lock()
            .await
            .push(Membership::new(actor.actor_id(), target, role));
    }

    pub async fn rule(&self, rule_id: RuleId) -> Option<Rule> {
        self.rules.lock().await.get(&rule_id).cloned()
    }
}

#[async_trait]
impl ResourceRepository for FakeAccessStore {
    async fn find_project(&self, project_id: ProjectId) -> AppResult<Option<Project>> {
        Ok(self.projects.lock().await.get(&project_id).cloned())
    }

    async fn find_component(&self, component_id: ComponentId) -> AppResult<Option<Component>> {
        Ok(self.components.lock().await.get(&component_id).cloned())
    }

    async fn find_rule(&self, rule_id: RuleId) -> AppResult<Option<Rule>> {
        Ok(self.rules.lock().await.get(&rule_id).cloned())
    }
}

#[async_trait]
impl MembershipRepository for FakeAccessStore {
    async fn find_membership(&self, membership_id: MembershipId) -> AppResult<Option<Membership>> {
        Ok(self
            .memberships
            .lock()
            .await
            .iter()
            .find(|membership| membership.id() == membership_id)
            .cloned())
    }

    async fn find_direct_role(
        &self,
        target: MembershipTarget,
        actor_id: ActorId,
    ) -> AppResult<Option<Role>> {
        Ok(self
            .memberships
            .lock()
            .await
            .iter()
            .filter(|membership| membership.target() == target && membership.actor_id() == actor_id)
            .map(Membership::role)
            .max())
    }

    async fn list_roles_for_actor(
        &self,
        actor_id: ActorId,
        targets: &[MembershipTarget],
    ) -> AppResult<Vec<Role>> {
        Ok(self
            .memberships
            .lock()
            .await
            .iter()
            .filter(|membership| {
                membership.actor_id() == actor_id && targets.contains(&membership.target())
            })
            .map(Membership::role)
            .collect())
    }

    async fn list_for_target(&self, target: MembershipTarget) -> AppResult<Vec<Membership>> {
        Ok(self
            .memberships
            .lock()
            .await
            .iter()
            .filter(|membership| membership.target() == target)
            .cloned()
            .collect())
    }

    async fn create_membership(&self, membership: Membership) -> AppResult<Membership> {
        self.memberships.lock().await.push(membership.clone());
        Ok(membership)
    }

    async fn update_membership_role(
        &self,
        membership_id: MembershipId,
        role: Role,
    ) -> AppResult<Membership> {
        let mut memberships = self.memberships.lock().await;
        let membership = memberships
            .iter_mut()
            .find(|membership| membership.id() == membership_id)
            .ok_or_else(|| AppError::NotFound(format!("membership '{membership_id}'")))?;
        *membership = membership.with_role(role);
        Ok(membership.clone())
    }

    async fn delete_membership(&self, membership_id: MembershipId) -> AppResult<()> {
        self.memberships
            .lock()
            .await
            .retain(|membership| membership.id() != membership_id);
        Ok(())
    }
}

#[async_trait]
impl RuleRepository for FakeAccessStore {
    async fn update_rule_if_unlocked(&self, rule: Rule) -> AppResult<Rule> {
        let mut rules = self.rules.lock().await;
        let stored = rules
            .get(&rule.id())
            .ok_or_else(|| AppError::NotFound(format!("rule '{}'", rule.id())))?;
        stored.ensure_unlocked()?;
        rules.insert(rule.id(), rule.clone());
        Ok(rule)
    }

    async fn delete_rule_if_unlocked(&self, rule_id: RuleId) -> AppResult<()> {
        let mut rules = self.rules.lock().await;
        let stored = rules
            .get(&rule_id)
            .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}'")))?;
        stored.ensure_unlocked()?;
        rules.remove(&rule_id);
        Ok(())
    }

    async fn unlock_rule(&self, rule_id: RuleId) -> AppResult<Rule> {
        let mut rules = self.rules.lock().await;
        let stored = rules
            .get(&rule_id)
            .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}'")))?;
        let unlocked = stored.unlocked();
        rules.insert(rule_id, unlocked.clone());
        Ok(unlocked)
    }
}

#[async_trait]
impl ActorDirectory for FakeAccessStore {
    async fn find_actor(&self, actor_id: ActorId) -> AppResult<Option<ActorProfile>> {
        Ok(self.actors.lock().await.get(&actor_id).cloned())
    }
}

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

/// Audit store whose every append fails.
pub(crate) struct UnavailableAuditRepository;

#[async_trait]
impl AuditRepository for UnavailableAuditRepository {
    async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
        Err(AppError::Internal("audit store unavailable".to_owned()))
    }
}

pub(crate) struct RecordingNotifier {
    pub channel: NotificationChannel,
    pub fail: bool,
    pub delivered: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new(channel: NotificationChannel, fail: bool) -> Self {
        Self {
            channel,
            fail,
            delivered: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MembershipNotifier for RecordingNotifier {
    fn channel(&self) -> NotificationChannel {
        self.channel
    }

    async fn notify(&self, notification: &MembershipNotification) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Internal("webhook unavailable".to_owned()));
        }

        self.delivered.lock().await.push(
            notification
                .event
                .notification_name(notification.membership.target().membership_type()),
        );
        Ok(())
    }
}

pub(crate) fn authorization_service(store: &Arc<FakeAccessStore>) -> AuthorizationService {
    AuthorizationService::new(store.clone(), store.clone())
}
