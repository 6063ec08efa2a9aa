//! Manager-scoped ownership and member-scoped visibility partitions.

use chitfund_api::domain::repository::MemberStore as _;
use chitfund_api::domain::types::ChitGroupPatch;
use chitfund_api::error::ChitServiceError;
use chitfund_api::infra::mem::MemStore;
use chitfund_api::usecase::chit_group::{
    GetChitGroupUseCase, ListChitGroupsUseCase, UpdateChitGroupUseCase,
};
use chitfund_api::usecase::user::ListCustomersUseCase;

use crate::helpers::*;

#[tokio::test]
async fn should_never_leak_groups_across_managers() {
    let store = MemStore::new();
    let mgr_a = register_manager(&store, "boss_a").await;
    let mgr_b = register_manager(&store, "boss_b").await;
    let group_a = create_group(&store, &mgr_a).await;
    let group_b = create_group(&store, &mgr_b).await;

    let list = ListChitGroupsUseCase {
        groups: store.clone(),
    };
    let of_a = list.execute(&manager_ctx(&mgr_a)).await.unwrap();
    assert_eq!(of_a.iter().map(|g| g.id).collect::<Vec<_>>(), vec![group_a.id]);
    let of_b = list.execute(&manager_ctx(&mgr_b)).await.unwrap();
    assert_eq!(of_b.iter().map(|g| g.id).collect::<Vec<_>>(), vec![group_b.id]);

    // Detail reads across the partition fail both directions.
    let get = GetChitGroupUseCase {
        groups: store.clone(),
        members: store.clone(),
    };
    assert!(matches!(
        get.execute(&manager_ctx(&mgr_a), group_b.id).await,
        Err(ChitServiceError::Forbidden)
    ));
    assert!(matches!(
        get.execute(&manager_ctx(&mgr_b), group_a.id).await,
        Err(ChitServiceError::Forbidden)
    ));
}

#[tokio::test]
async fn should_reject_cross_manager_updates_without_mutation() {
    let store = MemStore::new();
    let mgr_a = register_manager(&store, "boss_a").await;
    let mgr_b = register_manager(&store, "boss_b").await;
    let group_a = create_group(&store, &mgr_a).await;

    let update = UpdateChitGroupUseCase {
        groups: store.clone(),
    };
    let result = update
        .execute(
            &manager_ctx(&mgr_b),
            group_a.id,
            ChitGroupPatch {
                name: Some("Hijacked".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ChitServiceError::Forbidden)));

    let get = GetChitGroupUseCase {
        groups: store.clone(),
        members: store.clone(),
    };
    let unchanged = get.execute(&manager_ctx(&mgr_a), group_a.id).await.unwrap();
    assert_eq!(unchanged.name, "Gold Savers");
}

#[tokio::test]
async fn should_show_customer_exactly_their_membership_groups() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;
    let joined = create_group(&store, &mgr).await;
    let not_joined = create_group(&store, &mgr).await;
    enroll(&store, &mgr, &joined, &cust).await;

    let list = ListChitGroupsUseCase {
        groups: store.clone(),
    };
    let groups = list.execute(&customer_ctx(&cust)).await.unwrap();
    assert_eq!(groups.iter().map(|g| g.id).collect::<Vec<_>>(), vec![joined.id]);

    // No membership row, no detail access.
    let get = GetChitGroupUseCase {
        groups: store.clone(),
        members: store.clone(),
    };
    assert!(matches!(
        get.execute(&customer_ctx(&cust), not_joined.id).await,
        Err(ChitServiceError::Forbidden)
    ));
}

#[tokio::test]
async fn should_reflect_membership_removal_in_customer_listing() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;
    let group = create_group(&store, &mgr).await;
    enroll(&store, &mgr, &group, &cust).await;
    store.remove_member(group.id, cust.id).await.unwrap();

    let list = ListChitGroupsUseCase {
        groups: store.clone(),
    };
    assert!(list.execute(&customer_ctx(&cust)).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_scope_customer_directory_per_manager() {
    let store = MemStore::new();
    let mgr_a = register_manager(&store, "boss_a").await;
    let mgr_b = register_manager(&store, "boss_b").await;
    register_customer(&store, &mgr_a, "ravi").await;
    register_customer(&store, &mgr_a, "sita").await;
    register_customer(&store, &mgr_b, "kiran").await;

    let list = ListCustomersUseCase {
        users: store.clone(),
    };
    let of_a = list.execute(&manager_ctx(&mgr_a)).await.unwrap();
    let names: Vec<_> = of_a.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["ravi", "sita"]);

    let of_b = list.execute(&manager_ctx(&mgr_b)).await.unwrap();
    assert_eq!(of_b.len(), 1);
    assert_eq!(of_b[0].username, "kiran");
}
