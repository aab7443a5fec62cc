use async_trait::async_trait;
use vulcan_core::AppResult;
use vulcan_domain::{Component, ComponentId, Project, ProjectId, Rule, RuleId};

/// Read port over the project, component and rule hierarchy.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Finds a project by identifier.
    async fn find_project(&self, project_id: ProjectId) -> AppResult<Option<Project>>;

    /// Finds a component by identifier.
    async fn find_component(&self, component_id: ComponentId) -> AppResult<Option<Component>>;

    /// Finds a rule by identifier.
    async fn find_rule(&self, rule_id: RuleId) -> AppResult<Option<Rule>>;
}
