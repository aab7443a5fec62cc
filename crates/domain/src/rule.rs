//! Rules (controls) and the lock state machine that freezes them.

use serde::{Deserialize, Serialize};
use vulcan_core::{AppError, AppResult, NonEmptyString};

use crate::{ComponentId, RuleId};

/// Lock state of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    /// Content may be edited by authorized authors.
    Unlocked,
    /// Content is frozen until an explicit unlock.
    Locked,
}

impl LockState {
    /// Maps the persisted boolean flag to a state.
    #[must_use]
    pub fn from_flag(locked: bool) -> Self {
        if locked { Self::Locked } else { Self::Unlocked }
    }

    /// Returns the persisted boolean flag.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }
}

/// Control content owned by a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    id: RuleId,
    component_id: ComponentId,
    rule_id: NonEmptyString,
    title: NonEmptyString,
    fixtext: Option<String>,
    check_content: Option<String>,
    lock_state: LockState,
}

/// Partial content update for a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement fix text.
    pub fixtext: Option<String>,
    /// Replacement check content.
    pub check_content: Option<String>,
}

impl Rule {
    /// Creates a validated rule. New rules start unlocked.
    pub fn new(
        id: RuleId,
        component_id: ComponentId,
        rule_id: impl Into<String>,
        title: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            component_id,
            rule_id: NonEmptyString::new(rule_id)?,
            title: NonEmptyString::new(title)?,
            fixtext: None,
            check_content: None,
            lock_state: LockState::Unlocked,
        })
    }

    /// Rebuilds a rule from persisted values.
    pub fn from_parts(
        id: RuleId,
        component_id: ComponentId,
        rule_id: impl Into<String>,
        title: impl Into<String>,
        fixtext: Option<String>,
        check_content: Option<String>,
        locked: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            fixtext,
            check_content,
            lock_state: LockState::from_flag(locked),
            ..Self::new(id, component_id, rule_id, title)?
        })
    }

    /// Returns the rule identifier.
    #[must_use]
    pub fn id(&self) -> RuleId {
        self.id
    }

    /// Returns the owning component.
    #[must_use]
    pub fn component_id(&self) -> ComponentId {
        self.component_id
    }

    /// Returns the benchmark rule identifier, for example `SV-230221`.
    #[must_use]
    pub fn rule_id(&self) -> &NonEmptyString {
        &self.rule_id
    }

    /// Returns the rule title.
    #[must_use]
    pub fn title(&self) -> &NonEmptyString {
        &self.title
    }

    /// Returns the fix text.
    #[must_use]
    pub fn fixtext(&self) -> Option<&str> {
        self.fixtext.as_deref()
    }

    /// Returns the check content.
    #[must_use]
    pub fn check_content(&self) -> Option<&str> {
        self.check_content.as_deref()
    }

    /// Returns the lock state.
    #[must_use]
    pub fn lock_state(&self) -> LockState {
        self.lock_state
    }

    /// Returns whether the rule is locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock_state.is_locked()
    }

    /// Rejects any change while the rule is locked.
    ///
    /// Checked against the stored state, before any role check.
    pub fn ensure_unlocked(&self) -> AppResult<()> {
        if self.is_locked() {
            return Err(AppError::RuleLocked {
                rule_id: self.id.to_string(),
            });
        }

        Ok(())
    }

    /// Applies a content update to an unlocked rule.
    pub fn apply_update(&self, update: RuleUpdate) -> AppResult<Self> {
        self.ensure_unlocked()?;

        let mut field_errors = Vec::new();
        let title = match update.title {
            Some(title) => match NonEmptyString::new(title) {
                Ok(title) => title,
                Err(_) => {
                    field_errors.push("Title can't be blank".to_owned());
                    self.title.clone()
                }
            },
            None => self.title.clone(),
        };

        if !field_errors.is_empty() {
            return Err(AppError::InvalidFields(field_errors));
        }

        Ok(Self {
            title,
            fixtext: update.fixtext.or_else(|| self.fixtext.clone()),
            check_content: update.check_content.or_else(|| self.check_content.clone()),
            ..self.clone()
        })
    }

    /// Returns the unlocked copy of this rule.
    ///
    /// Only the lock flag changes; content is not revalidated.
    #[must_use]
    pub fn unlocked(&self) -> Self {
        Self {
            lock_state: LockState::Unlocked,
            ..self.clone()
        }
    }

    /// Returns the locked copy of this rule.
    #[must_use]
    pub fn locked(&self) -> Self {
        Self {
            lock_state: LockState::Locked,
            ..self.clone()
        }
    }
}
