use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vulcan_application::{
    ActorDirectory, ActorProfile, AuditEvent, AuditRepository, MembershipRepository,
    ResourceRepository, RuleRepository,
};
use vulcan_core::{ActorId, AppError, AppResult};
use vulcan_domain::{
    Component, ComponentId, Membership, MembershipId, MembershipTarget, Project, ProjectId, Role,
    Rule, RuleId,
};


/// In-memory access-control store for tests and local development.
///
/// Implements every persistence port over one set of maps so that a
/// single instance can back the whole application.
#[derive(Debug, Default)]
pub struct InMemoryAccessRepository {
    projects: RwLock<HashMap<ProjectId, Project>>,
    components: RwLock<HashMap<ComponentId, Component>>,
    rules: RwLock<HashMap<RuleId, Rule>>,
    memberships: RwLock<Vec<Membership>>,
    actors: RwLock<HashMap<ActorId, ActorProfile>>,
    audit_events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAccessRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or replaces a project.
    pub async fn insert_project(&self, project: Project) {
        self.projects.write().await.insert(project.id(), project);
    }

    /// Stores or replaces a component.
    pub async fn insert_component(&self, component: Component) {
        self.components
            .write()
            .await
            .insert(component.id(), component);
    }

    /// Stores or replaces a rule.
    pub async fn insert_rule(&self, rule: Rule) {
        self.rules.write().await.insert(rule.id(), rule);
    }

    /// Stores or replaces an actor profile.
    pub async fn insert_actor(&self, actor: ActorProfile) {
        self.actors.write().await.insert(actor.actor_id, actor);
    }

    /// Appends a membership row without the uniqueness check.
    ///
    /// Mirrors rows written before the unique index existed.
    pub async fn insert_membership_row(&self, membership: Membership) {
        self.memberships.write().await.push(membership);
    }

    /// Sets the lock flag of a stored rule.
    pub async fn lock_rule(&self, rule_id: RuleId) -> AppResult<Rule> {
        let mut rules = self.rules.write().await;
        let rule = rules
            .get_mut(&rule_id)
            .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}' was not found")))?;
        *rule = rule.locked();

        Ok(rule.clone())
    }

    /// Returns a snapshot of appended audit events.
    pub async fn audit_events(&self) -> Vec<AuditEvent> {
        self.audit_events.read().await.clone()
    }
}

#[async_trait]
impl ResourceRepository for InMemoryAccessRepository {
    async fn find_project(&self, project_id: ProjectId) -> AppResult<Option<Project>> {
        Ok(self.projects.read().await.get(&project_id).cloned())
    }

    async fn find_component(&self, component_id: ComponentId) -> AppResult<Option<Component>> {
        Ok(self.components.read().await.get(&component_id).cloned())
    }

    async fn find_rule(&self, rule_id: RuleId) -> AppResult<Option<Rule>> {
        Ok(self.rules.read().await.get(&rule_id).cloned())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryAccessRepository {
    async fn find_membership(&self, membership_id: MembershipId) -> AppResult<Option<Membership>> {
        Ok(self
            .memberships
            .read()
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
            .read()
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
            .read()
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
            .read()
            .await
            .iter()
            .filter(|membership| membership.target() == target)
            .cloned()
            .collect())
    }

    async fn create_membership(&self, membership: Membership) -> AppResult<Membership> {
        let mut memberships = self.memberships.write().await;

        if memberships.iter().any(|stored| {
            stored.actor_id() == membership.actor_id() && stored.target() == membership.target()
        }) {
            return Err(AppError::Conflict(format!(
                "user '{}' already has a membership on {} '{}'",
                membership.actor_id(),
                membership.target().kind(),
                membership.target().id()
            )));
        }

        memberships.push(membership.clone());
        Ok(membership)
    }

    async fn update_membership_role(
        &self,
        membership_id: MembershipId,
        role: Role,
    ) -> AppResult<Membership> {
        let mut memberships = self.memberships.write().await;
        let membership = memberships
            .iter_mut()
            .find(|membership| membership.id() == membership_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("membership '{membership_id}' was not found"))
            })?;
        *membership = membership.with_role(role);

        Ok(membership.clone())
    }

    async fn delete_membership(&self, membership_id: MembershipId) -> AppResult<()> {
        let mut memberships = self.memberships.write().await;
        let before = memberships.len();
        memberships.retain(|membership| membership.id() != membership_id);

        if memberships.len() == before {
            return Err(AppError::NotFound(format!(
                "membership '{membership_id}' was not found"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl RuleRepository for InMemoryAccessRepository {
    async fn update_rule_if_unlocked(&self, rule: Rule) -> AppResult<Rule> {
        let mut rules = self.rules.write().await;
        let stored = rules
            .get(&rule.id())
            .ok_or_else(|| AppError::NotFound(format!("rule '{}' was not found", rule.id())))?;
        stored.ensure_unlocked()?;

        let persisted = Rule::from_parts(
            rule.id(),
            stored.component_id(),
            rule.rule_id().as_str(),
            rule.title().as_str(),
            rule.fixtext().map(str::to_owned),
            rule.check_content().map(str::to_owned),
            false,
        )?;
        rules.insert(persisted.id(), persisted.clone());

        Ok(persisted)
    }

    async fn delete_rule_if_unlocked(&self, rule_id: RuleId) -> AppResult<()> {
        let mut rules = self.rules.write().await;
        let stored = rules
            .get(&rule_id)
            .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}' was not found")))?;
        stored.ensure_unlocked()?;
        rules.remove(&rule_id);

        Ok(())
    }

    async fn unlock_rule(&self, rule_id: RuleId) -> AppResult<Rule> {
        let mut rules = self.rules.write().await;
        let rule = rules
            .get_mut(&rule_id)
            .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}' was not found")))?;
        *rule = rule.unlocked();

        Ok(rule.clone())
    }
}

#[async_trait]
impl ActorDirectory for InMemoryAccessRepository {
    async fn find_actor(&self, actor_id: ActorId) -> AppResult<Option<ActorProfile>> {
        Ok(self.actors.read().await.get(&actor_id).cloned())
    }
}

#[async_trait]
impl AuditRepository for InMemoryAccessRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.audit_events.write().await.push(event);
        Ok(())
    }
}
