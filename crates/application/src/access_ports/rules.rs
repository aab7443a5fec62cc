use async_trait::async_trait;
use vulcan_core::AppResult;
use vulcan_domain::{Rule, RuleId};

/// Write port for rules.
///
/// The guarded writes compare the stored lock flag and write in one
/// atomic step, returning `RuleLocked` when the stored rule is locked.
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Persists rule content if the stored rule is still unlocked.
    async fn update_rule_if_unlocked(&self, rule: Rule) -> AppResult<Rule>;

    /// Deletes the rule if the stored rule is still unlocked.
    async fn delete_rule_if_unlocked(&self, rule_id: RuleId) -> AppResult<()>;

    /// Clears the lock flag without touching content.
    async fn unlock_rule(&self, rule_id: RuleId) -> AppResult<Rule>;
}
