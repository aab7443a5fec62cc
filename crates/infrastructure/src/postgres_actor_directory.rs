use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use vulcan_application::{ActorDirectory, ActorProfile};
use vulcan_core::{ActorId, AppError, AppResult};

/// PostgreSQL-backed user directory.
#[derive(Clone)]
pub struct PostgresActorDirectory {
    pool: PgPool,
}

impl PostgresActorDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts or refreshes a user account.
    pub async fn save_actor(&self, actor: &ActorProfile) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, display_name, email, admin)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET display_name = EXCLUDED.display_name,
                email = EXCLUDED.email,
                admin = EXCLUDED.admin
            "#,
        )
        .bind(actor.actor_id.as_uuid())
        .bind(actor.display_name.as_str())
        .bind(actor.email.as_deref())
        .bind(actor.is_global_admin)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save user: {error}")))?;

        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    display_name: String,
    email: Option<String>,
    admin: bool,
}

#[async_trait]
impl ActorDirectory for PostgresActorDirectory {
    async fn find_actor(&self, actor_id: ActorId) -> AppResult<Option<ActorProfile>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, display_name, email, admin
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(actor_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user: {error}")))?;

        Ok(row.map(|row| ActorProfile {
            actor_id: ActorId::from_uuid(row.id),
            display_name: row.display_name,
            email: row.email,
            is_global_admin: row.admin,
        }))
    }
}
