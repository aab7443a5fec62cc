use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres access tests: {error}");
    }

    Some(pool)
}

pub(crate) async fn insert_user(pool: &PgPool, admin: bool) -> Uuid {
    let user_id = Uuid::new_v4();
    let insert = sqlx::query(
        r#"
        INSERT INTO users (id, display_name, admin)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(user_id)
    .bind(format!("user {user_id}"))
    .bind(admin)
    .execute(pool)
    .await;

    assert!(insert.is_ok());
    user_id
}

/// Inserts a project, a component under it and a rule under that.
pub(crate) async fn insert_hierarchy(pool: &PgPool, locked: bool) -> (Uuid, Uuid, Uuid) {
    let project_id = Uuid::new_v4();
    let component_id = Uuid::new_v4();
    let rule_id = Uuid::new_v4();

    let project = sqlx::query("INSERT INTO projects (id, name) VALUES ($1, $2)")
        .bind(project_id)
        .bind("Web Server")
        .execute(pool)
        .await;
    assert!(project.is_ok());

    let component = sqlx::query("INSERT INTO components (id, project_id, name) VALUES ($1, $2, $3)")
        .bind(component_id)
        .bind(project_id)
        .bind("Apache")
        .execute(pool)
        .await;
    assert!(component.is_ok());

    let rule = sqlx::query(
        r#"
        INSERT INTO rules (id, component_id, rule_id, title, locked)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(rule_id)
    .bind(component_id)
    .bind("SV-214228")
    .bind("Limit concurrent sessions")
    .bind(locked)
    .execute(pool)
    .await;
    assert!(rule.is_ok());

    (project_id, component_id, rule_id)
}
