use vulcan_application::MembershipRepository;
use vulcan_core::{ActorId, AppError};
use vulcan_domain::{ComponentId, Membership, MembershipTarget, ProjectId, Role};

use crate::postgres_test_support::{insert_hierarchy, insert_user, test_pool};

use super::PostgresMembershipRepository;

#[tokio::test]
async fn unique_index_maps_to_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (project_id, _, _) = insert_hierarchy(&pool, false).await;
    let user_id = ActorId::from_uuid(insert_user(&pool, false).await);
    let repository = PostgresMembershipRepository::new(pool);
    let target = MembershipTarget::Project(ProjectId::from_uuid(project_id));

    let first = repository
        .create_membership(Membership::new(user_id, target, Role::Author))
        .await;
    let second = repository
        .create_membership(Membership::new(user_id, target, Role::Admin))
        .await;

    assert!(first.is_ok());
    assert!(matches!(second, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn roles_are_collected_across_targets() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (project_id, component_id, _) = insert_hierarchy(&pool, false).await;
    let user_id = ActorId::from_uuid(insert_user(&pool, false).await);
    let repository = PostgresMembershipRepository::new(pool);
    let project = MembershipTarget::Project(ProjectId::from_uuid(project_id));
    let component = MembershipTarget::Component(ComponentId::from_uuid(component_id));

    for (target, role) in [(project, Role::Viewer), (component, Role::Reviewer)] {
        let created = repository
            .create_membership(Membership::new(user_id, target, role))
            .await;
        assert!(created.is_ok());
    }

    let roles = repository
        .list_roles_for_actor(user_id, &[component, project])
        .await;
    let direct = repository.find_direct_role(project, user_id).await;

    let mut roles = roles.unwrap_or_default();
    roles.sort();
    assert_eq!(roles, vec![Role::Viewer, Role::Reviewer]);
    assert_eq!(direct.ok().flatten(), Some(Role::Viewer));
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (_, component_id, _) = insert_hierarchy(&pool, false).await;
    let user_id = ActorId::from_uuid(insert_user(&pool, false).await);
    let repository = PostgresMembershipRepository::new(pool);
    let target = MembershipTarget::Component(ComponentId::from_uuid(component_id));

    let Ok(created) = repository
        .create_membership(Membership::new(user_id, target, Role::Viewer))
        .await
    else {
        panic!("membership should be created");
    };

    let updated = repository
        .update_membership_role(created.id(), Role::Admin)
        .await;
    assert_eq!(updated.ok().map(|membership| membership.role()), Some(Role::Admin));

    assert!(repository.delete_membership(created.id()).await.is_ok());
    assert!(matches!(
        repository.delete_membership(created.id()).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(repository.find_membership(created.id()).await, Ok(None)));
}
