use async_trait::async_trait;
use vulcan_application::RuleRepository;
use vulcan_core::{AppError, AppResult};
use vulcan_domain::{Rule, RuleId};

use super::{PostgresResourceRepository, RuleRow};

impl PostgresResourceRepository {
    /// Sets the lock flag, for example after a review approval.
    pub async fn lock_rule(&self, rule_id: RuleId) -> AppResult<Rule> {
        self.set_lock_flag(rule_id, true).await
    }

    async fn set_lock_flag(&self, rule_id: RuleId, locked: bool) -> AppResult<Rule> {
        sqlx::query_as::<_, RuleRow>(
            r#"
            UPDATE rules
            SET locked = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, component_id, rule_id, title, fixtext, check_content, locked
            "#,
        )
        .bind(rule_id.as_uuid())
        .bind(locked)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to change rule lock: {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}' was not found")))?
        .into_rule()
    }

    /// Explains why a guarded write matched no row.
    async fn guarded_write_miss(&self, rule_id: RuleId) -> AppError {
        let stored = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT locked
            FROM rules
            WHERE id = $1
            "#,
        )
        .bind(rule_id.as_uuid())
        .fetch_optional(&self.pool)
        .await;

        match stored {
            Ok(Some(true)) => AppError::RuleLocked {
                rule_id: rule_id.to_string(),
            },
            Ok(Some(false)) => {
                AppError::Conflict(format!("rule '{rule_id}' changed during the write"))
            }
            Ok(None) => AppError::NotFound(format!("rule '{rule_id}' was not found")),
            Err(error) => AppError::Internal(format!("failed to read rule lock: {error}")),
        }
    }
}

#[async_trait]
impl RuleRepository for PostgresResourceRepository {
    async fn update_rule_if_unlocked(&self, rule: Rule) -> AppResult<Rule> {
        let row = sqlx::query_as::<_, RuleRow>(
            r#"
            UPDATE rules
            SET title = $2, fixtext = $3, check_content = $4, updated_at = NOW()
            WHERE id = $1 AND locked = FALSE
            RETURNING id, component_id, rule_id, title, fixtext, check_content, locked
            "#,
        )
        .bind(rule.id().as_uuid())
        .bind(rule.title().as_str())
        .bind(rule.fixtext())
        .bind(rule.check_content())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update rule: {error}")))?;

        match row {
            Some(row) => row.into_rule(),
            None => Err(self.guarded_write_miss(rule.id()).await),
        }
    }

    async fn delete_rule_if_unlocked(&self, rule_id: RuleId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM rules
            WHERE id = $1 AND locked = FALSE
            "#,
        )
        .bind(rule_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete rule: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(self.guarded_write_miss(rule_id).await);
        }

        Ok(())
    }

    async fn unlock_rule(&self, rule_id: RuleId) -> AppResult<Rule> {
        self.set_lock_flag(rule_id, false).await
    }
}
