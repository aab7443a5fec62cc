use std::sync::Arc;

use tracing::{info, warn};
use vulcan_core::{AppError, AppResult, UserIdentity};
use vulcan_domain::{AuditAction, Operation, ResourceRef, Rule, RuleId, RuleUpdate};

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, ResourceRepository, RuleRepository,
    UnlockPolicy,
};


/// Application service guarding rule content behind the lock state.
#[derive(Clone)]
pub struct RuleService {
    authorization_service: AuthorizationService,
    resources: Arc<dyn ResourceRepository>,
    rules: Arc<dyn RuleRepository>,
    unlock_policy: Arc<dyn UnlockPolicy>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl RuleService {
    /// Creates a new rule service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        resources: Arc<dyn ResourceRepository>,
        rules: Arc<dyn RuleRepository>,
        unlock_policy: Arc<dyn UnlockPolicy>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            resources,
            rules,
            unlock_policy,
            audit_repository,
        }
    }

    /// Returns a rule visible to the actor.
    pub async fn get_rule(&self, actor: &UserIdentity, rule_id: RuleId) -> AppResult<Rule> {
        let rule = self.load(rule_id).await?;
        self.authorization_service
            .require_operation(actor, ResourceRef::Rule(rule_id), Operation::ViewResource)
            .await?;

        Ok(rule)
    }

    /// Updates rule content.
    ///
    /// A locked rule is rejected before any role check, so global admins
    /// receive `RuleLocked` as well.
    pub async fn update_rule(
        &self,
        actor: &UserIdentity,
        rule_id: RuleId,
        update: RuleUpdate,
    ) -> AppResult<Rule> {
        let rule = self.load(rule_id).await?;
        rule.ensure_unlocked()?;

        self.authorization_service
            .require_operation(actor, ResourceRef::Rule(rule_id), Operation::EditRule)
            .await?;

        let updated = self
            .rules
            .update_rule_if_unlocked(rule.apply_update(update)?)
            .await?;

        self.append_audit(
            actor,
            AuditAction::RuleUpdated,
            rule_id,
            format!("updated rule '{}'", updated.rule_id().as_str()),
        )
        .await;

        Ok(updated)
    }

    /// Deletes a rule. Same lock precedence as updates.
    pub async fn delete_rule(&self, actor: &UserIdentity, rule_id: RuleId) -> AppResult<()> {
        let rule = self.load(rule_id).await?;
        rule.ensure_unlocked()?;

        self.authorization_service
            .require_operation(actor, ResourceRef::Rule(rule_id), Operation::DeleteRule)
            .await?;

        self.rules.delete_rule_if_unlocked(rule_id).await?;

        info!(rule_id = %rule_id, "rule deleted");
        self.append_audit(
            actor,
            AuditAction::RuleDeleted,
            rule_id,
            format!("deleted rule '{}'", rule.rule_id().as_str()),
        )
        .await;

        Ok(())
    }

    /// Clears the lock flag when the unlock policy allows it.
    ///
    /// Unlocking an unlocked rule succeeds without a state change.
    pub async fn unlock_rule(&self, actor: &UserIdentity, rule_id: RuleId) -> AppResult<Rule> {
        let rule = self.load(rule_id).await?;

        if !self.unlock_policy.can_unlock(actor, &rule).await? {
            return Err(AppError::not_authorized(
                ResourceRef::Rule(rule_id).kind().as_str(),
                "unlock",
            ));
        }

        if !rule.is_locked() {
            return Ok(rule);
        }

        let unlocked = self.rules.unlock_rule(rule_id).await?;

        info!(rule_id = %rule_id, actor_id = %actor.actor_id(), "rule unlocked");
        self.append_audit(
            actor,
            AuditAction::RuleUnlocked,
            rule_id,
            format!("unlocked rule '{}'", unlocked.rule_id().as_str()),
        )
        .await;

        Ok(unlocked)
    }

    async fn load(&self, rule_id: RuleId) -> AppResult<Rule> {
        self.resources
            .find_rule(rule_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}' was not found")))
    }

    /// Records a committed change. A failed append is logged and never
    /// turns the committed write into an error.
    async fn append_audit(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        rule_id: RuleId,
        detail: String,
    ) {
        let result = self
            .audit_repository
            .append_event(AuditEvent {
                subject: actor.actor_id().to_string(),
                action,
                resource_type: "rule".to_owned(),
                resource_id: rule_id.to_string(),
                detail: Some(detail),
            })
            .await;

        if let Err(error) = result {
            warn!(
                action = action.as_str(),
                resource_id = %rule_id,
                %error,
                "failed to append audit event"
            );
        }
    }
}
