use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use vulcan_application::ResourceRepository;
use vulcan_core::{AppError, AppResult};
use vulcan_domain::{Component, ComponentId, Project, ProjectId, Rule, RuleId};

mod rules;

#[cfg(test)]
mod tests;

/// PostgreSQL-backed repository for projects, components and rules.
#[derive(Clone)]
pub struct PostgresResourceRepository {
    pool: PgPool,
}

impl PostgresResourceRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
}

#[derive(Debug, FromRow)]
struct ComponentRow {
    id: Uuid,
    project_id: Uuid,
    name: String,
}

#[derive(Debug, FromRow)]
pub(crate) struct RuleRow {
    id: Uuid,
    component_id: Uuid,
    rule_id: String,
    title: String,
    fixtext: Option<String>,
    check_content: Option<String>,
    locked: bool,
}

impl RuleRow {
    pub(crate) fn into_rule(self) -> AppResult<Rule> {
        let id = RuleId::from_uuid(self.id);
        Rule::from_parts(
            id,
            ComponentId::from_uuid(self.component_id),
            self.rule_id,
            self.title,
            self.fixtext,
            self.check_content,
            self.locked,
        )
        .map_err(|error| AppError::Internal(format!("persisted rule '{id}' is invalid: {error}")))
    }
}

#[async_trait]
impl ResourceRepository for PostgresResourceRepository {
    async fn find_project(&self, project_id: ProjectId) -> AppResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find project: {error}")))?;

        row.map(|row| {
            Project::new(ProjectId::from_uuid(row.id), row.name).map_err(|error| {
                AppError::Internal(format!(
                    "persisted project '{project_id}' is invalid: {error}"
                ))
            })
        })
        .transpose()
    }

    async fn find_component(&self, component_id: ComponentId) -> AppResult<Option<Component>> {
        let row = sqlx::query_as::<_, ComponentRow>(
            r#"
            SELECT id, project_id, name
            FROM components
            WHERE id = $1
            "#,
        )
        .bind(component_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find component: {error}")))?;

        row.map(|row| {
            Component::new(
                ComponentId::from_uuid(row.id),
                ProjectId::from_uuid(row.project_id),
                row.name,
            )
            .map_err(|error| {
                AppError::Internal(format!(
                    "persisted component '{component_id}' is invalid: {error}"
                ))
            })
        })
        .transpose()
    }

    async fn find_rule(&self, rule_id: RuleId) -> AppResult<Option<Rule>> {
        sqlx::query_as::<_, RuleRow>(
            r#"
            SELECT id, component_id, rule_id, title, fixtext, check_content, locked
            FROM rules
            WHERE id = $1
            "#,
        )
        .bind(rule_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find rule: {error}")))?
        .map(RuleRow::into_rule)
        .transpose()
    }
}
