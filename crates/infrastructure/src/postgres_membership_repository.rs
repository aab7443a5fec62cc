use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use vulcan_application::MembershipRepository;
use vulcan_core::{ActorId, AppError, AppResult};
use vulcan_domain::{
    ComponentId, Membership, MembershipId, MembershipTarget, MembershipType, ProjectId, Role,
};

#[cfg(test)]
mod tests;

/// PostgreSQL-backed membership repository.
#[derive(Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MembershipRow {
    id: Uuid,
    user_id: Uuid,
    membership_type: String,
    membership_id: Uuid,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MembershipRow {
    fn into_membership(self) -> AppResult<Membership> {
        let target = match MembershipType::from_str(self.membership_type.as_str()) {
            Ok(MembershipType::Project) => {
                MembershipTarget::Project(ProjectId::from_uuid(self.membership_id))
            }
            Ok(MembershipType::Component) => {
                MembershipTarget::Component(ComponentId::from_uuid(self.membership_id))
            }
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "persisted membership '{}' has invalid type: {error}",
                    self.id
                )));
            }
        };

        Ok(Membership::from_parts(
            MembershipId::from_uuid(self.id),
            ActorId::from_uuid(self.user_id),
            target,
            parse_stored_role(self.role.as_str())?,
            self.created_at,
            self.updated_at,
        ))
    }
}

fn parse_stored_role(value: &str) -> AppResult<Role> {
    Role::from_str(value)
        .map_err(|error| AppError::Internal(format!("persisted membership role is invalid: {error}")))
}

fn split_targets(targets: &[MembershipTarget]) -> (Vec<Uuid>, Vec<Uuid>) {
    let mut project_ids = Vec::new();
    let mut component_ids = Vec::new();
    for target in targets {
        match target {
            MembershipTarget::Project(project_id) => project_ids.push(project_id.as_uuid()),
            MembershipTarget::Component(component_id) => {
                component_ids.push(component_id.as_uuid());
            }
        }
    }

    (project_ids, component_ids)
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn find_membership(&self, membership_id: MembershipId) -> AppResult<Option<Membership>> {
        sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, user_id, membership_type, membership_id, role, created_at, updated_at
            FROM memberships
            WHERE id = $1
            "#,
        )
        .bind(membership_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find membership: {error}")))?
        .map(MembershipRow::into_membership)
        .transpose()
    }

    async fn find_direct_role(
        &self,
        target: MembershipTarget,
        actor_id: ActorId,
    ) -> AppResult<Option<Role>> {
        let roles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT role
            FROM memberships
            WHERE membership_type = $1 AND membership_id = $2 AND user_id = $3
            "#,
        )
        .bind(target.membership_type().as_str())
        .bind(target.id())
        .bind(actor_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to resolve direct membership role: {error}"))
        })?;

        roles
            .iter()
            .map(|role| parse_stored_role(role.as_str()))
            .collect::<AppResult<Vec<_>>>()
            .map(|roles| roles.into_iter().max())
    }

    async fn list_roles_for_actor(
        &self,
        actor_id: ActorId,
        targets: &[MembershipTarget],
    ) -> AppResult<Vec<Role>> {
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let (project_ids, component_ids) = split_targets(targets);
        let roles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT role
            FROM memberships
            WHERE user_id = $1
              AND (
                (membership_type = 'Project' AND membership_id = ANY($2))
                OR (membership_type = 'Component' AND membership_id = ANY($3))
              )
            "#,
        )
        .bind(actor_id.as_uuid())
        .bind(project_ids)
        .bind(component_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list actor roles: {error}")))?;

        roles
            .iter()
            .map(|role| parse_stored_role(role.as_str()))
            .collect()
    }

    async fn list_for_target(&self, target: MembershipTarget) -> AppResult<Vec<Membership>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, user_id, membership_type, membership_id, role, created_at, updated_at
            FROM memberships
            WHERE membership_type = $1 AND membership_id = $2
            ORDER BY created_at, id
            "#,
        )
        .bind(target.membership_type().as_str())
        .bind(target.id())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list memberships: {error}")))?;

        rows.into_iter().map(MembershipRow::into_membership).collect()
    }

    async fn create_membership(&self, membership: Membership) -> AppResult<Membership> {
        let target = membership.target();
        let result = sqlx::query_as::<_, MembershipRow>(
            r#"
            INSERT INTO memberships (
                id,
                user_id,
                membership_type,
                membership_id,
                role,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, membership_type, membership_id, role, created_at, updated_at
            "#,
        )
        .bind(membership.id().as_uuid())
        .bind(membership.actor_id().as_uuid())
        .bind(target.membership_type().as_str())
        .bind(target.id())
        .bind(membership.role().as_str())
        .bind(membership.created_at())
        .bind(membership.updated_at())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row.into_membership(),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "user '{}' already has a membership on {} '{}'",
                        membership.actor_id(),
                        target.kind(),
                        target.id()
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to create membership: {error}"
                )))
            }
        }
    }

    async fn update_membership_role(
        &self,
        membership_id: MembershipId,
        role: Role,
    ) -> AppResult<Membership> {
        sqlx::query_as::<_, MembershipRow>(
            r#"
            UPDATE memberships
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, membership_type, membership_id, role, created_at, updated_at
            "#,
        )
        .bind(membership_id.as_uuid())
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update membership: {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("membership '{membership_id}' was not found")))?
        .into_membership()
    }

    async fn delete_membership(&self, membership_id: MembershipId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM memberships
            WHERE id = $1
            "#,
        )
        .bind(membership_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete membership: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "membership '{membership_id}' was not found"
            )));
        }

        Ok(())
    }
}
