use serde::{Deserialize, Serialize};
use ts_rs::TS;
use vulcan_domain::{Rule, RuleUpdate};

/// Incoming payload for rule content updates. Absent fields are kept.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-rule-request.ts"
)]
pub struct UpdateRuleRequest {
    #[ts(optional)]
    pub title: Option<String>,
    #[ts(optional)]
    pub fixtext: Option<String>,
    #[ts(optional)]
    pub check_content: Option<String>,
}

impl From<UpdateRuleRequest> for RuleUpdate {
    fn from(value: UpdateRuleRequest) -> Self {
        Self {
            title: value.title,
            fixtext: value.fixtext,
            check_content: value.check_content,
        }
    }
}

/// API representation of a rule.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/rule-response.ts"
)]
pub struct RuleResponse {
    pub id: String,
    pub component_id: String,
    pub rule_id: String,
    pub title: String,
    pub fixtext: Option<String>,
    pub check_content: Option<String>,
    pub locked: bool,
}

impl From<Rule> for RuleResponse {
    fn from(rule: Rule) -> Self {
        Self {
            id: rule.id().to_string(),
            component_id: rule.component_id().to_string(),
            rule_id: rule.rule_id().as_str().to_owned(),
            title: rule.title().as_str().to_owned(),
            fixtext: rule.fixtext().map(ToOwned::to_owned),
            check_content: rule.check_content().map(ToOwned::to_owned),
            locked: rule.is_locked(),
        }
    }
}
