use std::sync::Arc;

use vulcan_core::AppError;
use vulcan_domain::{
    ComponentId, EffectiveRole, MembershipTarget, Operation, ProjectId, ResourceRef, Role, RuleId,
};

use crate::test_support::{FakeAccessStore, authorization_service};

#[tokio::test]
async fn project_admin_is_admin_on_nested_rule() {
    let store = Arc::new(FakeAccessStore::default());
    let project_id = store.add_project().await;
    let component_id = store.add_component(project_id).await;
    let rule_id = store.add_rule(component_id, false).await;
    let actor = store.add_actor(false).await;
    store
        .grant(&actor, MembershipTarget::Project(project_id), Role::Admin)
        .await;
    let service = authorization_service(&store);

    let effective = service
        .effective_role(&actor, ResourceRef::Rule(rule_id))
        .await;

    assert_eq!(effective.ok(), Some(EffectiveRole::granted(Role::Admin)));
}

#[tokio::test]
async fn global_admin_short_circuits_without_memberships() {
    let store = Arc::new(FakeAccessStore::default());
    let actor = store.add_actor(true).await;
    let service = authorization_service(&store);

    for resource in [
        ResourceRef::Project(ProjectId::new()),
        ResourceRef::Component(ComponentId::new()),
        ResourceRef::Rule(RuleId::new()),
    ] {
        let effective = service.effective_role(&actor, resource).await;
        assert_eq!(effective.ok(), Some(EffectiveRole::granted(Role::Admin)));
    }
}

#[tokio::test]
async fn actor_without_grants_resolves_to_none() {
    let store = Arc::new(FakeAccessStore::default());
    let project_id = store.add_project().await;
    let component_id = store.add_component(project_id).await;
    let rule_id = store.add_rule(component_id, false).await;
    let actor = store.add_actor(false).await;
    let service = authorization_service(&store);

    for resource in [
        ResourceRef::Project(project_id),
        ResourceRef::Component(component_id),
        ResourceRef::Rule(rule_id),
    ] {
        let effective = service.effective_role(&actor, resource).await;
        assert_eq!(effective.ok(), Some(EffectiveRole::none()));
    }
}

#[tokio::test]
async fn highest_role_wins_across_chain_and_duplicates() {
    let store = Arc::new(FakeAccessStore::default());
    let project_id = store.add_project().await;
    let component_id = store.add_component(project_id).await;
    let actor = store.add_actor(false).await;
    store
        .grant(&actor, MembershipTarget::Project(project_id), Role::Viewer)
        .await;
    store
        .grant(&actor, MembershipTarget::Component(component_id), Role::Author)
        .await;
    store
        .grant(&actor, MembershipTarget::Component(component_id), Role::Reviewer)
        .await;
    let service = authorization_service(&store);

    let effective = service
        .effective_role(&actor, ResourceRef::Component(component_id))
        .await;

    assert_eq!(effective.ok(), Some(EffectiveRole::granted(Role::Reviewer)));
}

#[tokio::test]
async fn component_grant_does_not_leak_to_project() {
    let store = Arc::new(FakeAccessStore::default());
    let project_id = store.add_project().await;
    let component_id = store.add_component(project_id).await;
    let actor = store.add_actor(false).await;
    store
        .grant(&actor, MembershipTarget::Component(component_id), Role::Admin)
        .await;
    let service = authorization_service(&store);

    let effective = service
        .effective_role(&actor, ResourceRef::Project(project_id))
        .await;

    assert_eq!(effective.ok(), Some(EffectiveRole::none()));
}

#[tokio::test]
async fn dangling_component_reference_grants_nothing() {
    let store = Arc::new(FakeAccessStore::default());
    let project_id = store.add_project().await;
    let orphan_component_id = ComponentId::new();
    let rule_id = store.add_rule(orphan_component_id, false).await;
    let actor = store.add_actor(false).await;
    store
        .grant(&actor, MembershipTarget::Project(project_id), Role::Admin)
        .await;
    store
        .grant(
            &actor,
            MembershipTarget::Component(orphan_component_id),
            Role::Admin,
        )
        .await;
    let service = authorization_service(&store);

    let effective = service
        .effective_role(&actor, ResourceRef::Rule(rule_id))
        .await;

    assert_eq!(effective.ok(), Some(EffectiveRole::none()));
}

#[tokio::test]
async fn resource_chain_walks_rule_to_project() {
    let store = Arc::new(FakeAccessStore::default());
    let project_id = store.add_project().await;
    let component_id = store.add_component(project_id).await;
    let rule_id = store.add_rule(component_id, false).await;
    let service = authorization_service(&store);

    let chain = service.resource_chain(ResourceRef::Rule(rule_id)).await;

    assert_eq!(
        chain.unwrap_or_default(),
        vec![
            MembershipTarget::Component(component_id),
            MembershipTarget::Project(project_id),
        ]
    );
}

#[tokio::test]
async fn require_operation_names_resource_kind_on_denial() {
    let store = Arc::new(FakeAccessStore::default());
    let project_id = store.add_project().await;
    let component_id = store.add_component(project_id).await;
    let rule_id = store.add_rule(component_id, false).await;
    let actor = store.add_actor(false).await;
    store
        .grant(&actor, MembershipTarget::Project(project_id), Role::Viewer)
        .await;
    let service = authorization_service(&store);

    let result = service
        .require_operation(&actor, ResourceRef::Rule(rule_id), Operation::EditRule)
        .await;

    assert!(matches!(
        result,
        Err(AppError::NotAuthorized { resource_kind, .. }) if resource_kind == "Rule"
    ));
}

#[tokio::test]
async fn authorize_accepts_higher_tier() {
    let store = Arc::new(FakeAccessStore::default());
    let project_id = store.add_project().await;
    let actor = store.add_actor(false).await;
    store
        .grant(&actor, MembershipTarget::Project(project_id), Role::Reviewer)
        .await;
    let service = authorization_service(&store);

    let resource = ResourceRef::Project(project_id);
    assert!(service.authorize(&actor, resource, Role::Author).await.is_ok());
    assert!(service.authorize(&actor, resource, Role::Admin).await.is_err());
}

#[tokio::test]
async fn direct_admin_check_ignores_inherited_grants() {
    let store = Arc::new(FakeAccessStore::default());
    let project_id = store.add_project().await;
    let component_id = store.add_component(project_id).await;
    let inherited_admin = store.add_actor(false).await;
    let direct_admin = store.add_actor(false).await;
    store
        .grant(
            &inherited_admin,
            MembershipTarget::Project(project_id),
            Role::Admin,
        )
        .await;
    store
        .grant(
            &direct_admin,
            MembershipTarget::Component(component_id),
            Role::Admin,
        )
        .await;
    let service = authorization_service(&store);
    let target = MembershipTarget::Component(component_id);

    let inherited = service.require_direct_admin(&inherited_admin, target).await;
    let direct = service.require_direct_admin(&direct_admin, target).await;

    assert!(matches!(inherited, Err(AppError::NotAuthorized { .. })));
    assert!(direct.is_ok());
}
