use vulcan_application::{ResourceRepository, RuleRepository};
use vulcan_core::AppError;
use vulcan_domain::{ComponentId, ProjectId, RuleId, RuleUpdate};

use crate::postgres_test_support::{insert_hierarchy, test_pool};

use super::PostgresResourceRepository;

#[tokio::test]
async fn resolves_hierarchy_rows() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (project_id, component_id, rule_id) = insert_hierarchy(&pool, false).await;
    let repository = PostgresResourceRepository::new(pool);

    let project = repository.find_project(ProjectId::from_uuid(project_id)).await;
    let component = repository
        .find_component(ComponentId::from_uuid(component_id))
        .await;
    let rule = repository.find_rule(RuleId::from_uuid(rule_id)).await;

    assert!(matches!(project, Ok(Some(_))));
    assert_eq!(
        component
            .ok()
            .flatten()
            .map(|component| component.project_id().as_uuid()),
        Some(project_id)
    );
    assert_eq!(
        rule.ok()
            .flatten()
            .map(|rule| rule.component_id().as_uuid()),
        Some(component_id)
    );
}

#[tokio::test]
async fn guarded_update_rejects_locked_rule() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (_, _, rule_id) = insert_hierarchy(&pool, false).await;
    let repository = PostgresResourceRepository::new(pool);
    let rule_id = RuleId::from_uuid(rule_id);

    let Ok(Some(rule)) = repository.find_rule(rule_id).await else {
        panic!("seeded rule should exist");
    };
    let Ok(edited) = rule.apply_update(RuleUpdate {
        title: Some("Limit sessions to ten".to_owned()),
        ..RuleUpdate::default()
    }) else {
        panic!("unlocked rule should accept the update");
    };

    let locked = repository.lock_rule(rule_id).await;
    assert!(locked.is_ok());

    let update = repository.update_rule_if_unlocked(edited).await;
    let delete = repository.delete_rule_if_unlocked(rule_id).await;

    assert!(matches!(update, Err(AppError::RuleLocked { .. })));
    assert!(matches!(delete, Err(AppError::RuleLocked { .. })));
}

#[tokio::test]
async fn unlock_then_update_persists_content() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (_, _, rule_id) = insert_hierarchy(&pool, true).await;
    let repository = PostgresResourceRepository::new(pool);
    let rule_id = RuleId::from_uuid(rule_id);

    let Ok(unlocked) = repository.unlock_rule(rule_id).await else {
        panic!("unlock should succeed");
    };
    assert!(!unlocked.is_locked());

    let Ok(edited) = unlocked.apply_update(RuleUpdate {
        fixtext: Some("Set MaxKeepAliveRequests 100".to_owned()),
        ..RuleUpdate::default()
    }) else {
        panic!("unlocked rule should accept the update");
    };
    let saved = repository.update_rule_if_unlocked(edited).await;

    assert_eq!(
        saved.ok().and_then(|rule| rule.fixtext().map(str::to_owned)),
        Some("Set MaxKeepAliveRequests 100".to_owned())
    );
}

#[tokio::test]
async fn guarded_delete_of_missing_rule_is_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresResourceRepository::new(pool);

    let result = repository.delete_rule_if_unlocked(RuleId::new()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
