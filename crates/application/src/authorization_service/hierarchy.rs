use vulcan_core::AppResult;
use vulcan_domain::{ComponentId, MembershipTarget, ProjectId, ResourceRef};

use super::AuthorizationService;

impl AuthorizationService {
    /// Returns the grant-bearing resources from `resource` up to its project.
    ///
    /// Missing resources end the walk, so a dangling reference contributes
    /// no grants.
    pub async fn resource_chain(&self, resource: ResourceRef) -> AppResult<Vec<MembershipTarget>> {
        match resource {
            ResourceRef::Project(project_id) => self.project_chain(project_id).await,
            ResourceRef::Component(component_id) => self.component_chain(component_id).await,
            ResourceRef::Rule(rule_id) => match self.resources.find_rule(rule_id).await? {
                Some(rule) => self.component_chain(rule.component_id()).await,
                None => Ok(Vec::new()),
            },
        }
    }

    async fn component_chain(&self, component_id: ComponentId) -> AppResult<Vec<MembershipTarget>> {
        let Some(component) = self.resources.find_component(component_id).await? else {
            return Ok(Vec::new());
        };

        let mut chain = vec![MembershipTarget::Component(component_id)];
        chain.extend(self.project_chain(component.project_id()).await?);
        Ok(chain)
    }

    async fn project_chain(&self, project_id: ProjectId) -> AppResult<Vec<MembershipTarget>> {
        Ok(self
            .resources
            .find_project(project_id)
            .await?
            .map(|_| vec![MembershipTarget::Project(project_id)])
            .unwrap_or_default())
    }
}
