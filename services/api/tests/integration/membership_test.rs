//! Membership uniqueness and the managed-customer constraint.

use chitfund_api::domain::repository::{MemberStore as _, UserStore as _};
use chitfund_api::error::ChitServiceError;
use chitfund_api::infra::mem::MemStore;
use chitfund_api::usecase::member::{AddMemberInput, AddMemberUseCase, RemoveMemberUseCase};

use crate::helpers::*;

fn add_uc(store: &MemStore) -> AddMemberUseCase<MemStore, MemStore, MemStore> {
    AddMemberUseCase {
        groups: store.clone(),
        members: store.clone(),
        users: store.clone(),
    }
}

#[tokio::test]
async fn should_keep_exactly_one_row_after_duplicate_enrollment() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;
    let group = create_group(&store, &mgr).await;

    enroll(&store, &mgr, &group, &cust).await;
    let second = add_uc(&store)
        .execute(
            &manager_ctx(&mgr),
            group.id,
            AddMemberInput {
                user_id: cust.id,
                join_date: None,
            },
        )
        .await;
    assert!(matches!(second, Err(ChitServiceError::DuplicateMember)));
    assert_eq!(store.members_of_group(group.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_block_enrolling_customers_of_other_managers() {
    let store = MemStore::new();
    let mgr_a = register_manager(&store, "boss_a").await;
    let mgr_b = register_manager(&store, "boss_b").await;
    let cust_of_b = register_customer(&store, &mgr_b, "ravi").await;
    let group_a = create_group(&store, &mgr_a).await;

    let result = add_uc(&store)
        .execute(
            &manager_ctx(&mgr_a),
            group_a.id,
            AddMemberInput {
                user_id: cust_of_b.id,
                join_date: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ChitServiceError::Forbidden)));
    assert!(store.members_of_group(group_a.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_block_enrolling_a_manager_account() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let other_mgr = register_manager(&store, "boss_two").await;
    let group = create_group(&store, &mgr).await;

    let result = add_uc(&store)
        .execute(
            &manager_ctx(&mgr),
            group.id,
            AddMemberInput {
                user_id: other_mgr.id,
                join_date: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ChitServiceError::Forbidden)));
}

#[tokio::test]
async fn should_report_not_found_when_removing_absent_membership() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;
    let group = create_group(&store, &mgr).await;

    let uc = RemoveMemberUseCase {
        groups: store.clone(),
        members: store.clone(),
        users: store.clone(),
    };
    let result = uc.execute(&manager_ctx(&mgr), group.id, cust.id).await;
    assert!(matches!(result, Err(ChitServiceError::MemberNotFound)));
}

#[tokio::test]
async fn should_keep_user_account_after_membership_removal() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;
    let group = create_group(&store, &mgr).await;
    enroll(&store, &mgr, &group, &cust).await;

    let uc = RemoveMemberUseCase {
        groups: store.clone(),
        members: store.clone(),
        users: store.clone(),
    };
    uc.execute(&manager_ctx(&mgr), group.id, cust.id)
        .await
        .unwrap();

    assert!(store.membership(group.id, cust.id).await.unwrap().is_none());
    assert!(store.user(cust.id).await.unwrap().is_some());
}
