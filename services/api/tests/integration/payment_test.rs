//! Payment recording and its coupled notification write.

use chitfund_api::domain::repository::{NotificationStore as _, PaymentStore as _};
use chitfund_api::error::ChitServiceError;
use chitfund_api::infra::mem::MemStore;
use chitfund_api::usecase::payment::{RecordPaymentInput, RecordPaymentUseCase};
use chitfund_domain::status::{NotificationKind, PaymentStatus};

use crate::helpers::*;

fn record_uc(
    store: &MemStore,
) -> RecordPaymentUseCase<MemStore, MemStore, MemStore, MemStore, MemStore> {
    RecordPaymentUseCase {
        groups: store.clone(),
        members: store.clone(),
        users: store.clone(),
        payments: store.clone(),
        notifications: store.clone(),
    }
}

fn input(gid: i32, uid: i32) -> RecordPaymentInput {
    RecordPaymentInput {
        chit_group_id: gid,
        user_id: uid,
        amount: 10_000,
        payment_date: "2024-02-05".parse().unwrap(),
        month_number: 1,
        status: PaymentStatus::Paid,
    }
}

#[tokio::test]
async fn should_write_one_payment_and_one_notification() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;
    let group = create_group(&store, &mgr).await;
    enroll(&store, &mgr, &group, &cust).await;

    let payment = record_uc(&store)
        .execute(&manager_ctx(&mgr), input(group.id, cust.id))
        .await
        .unwrap();

    let payments = store.payments_by_group(group.id).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].id, payment.id);

    let notes = store.notifications_for_user(cust.id).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].user_id, cust.id);
    assert_eq!(notes[0].kind, NotificationKind::Payment);
    assert!(!notes[0].is_read);
}

#[tokio::test]
async fn should_write_nothing_for_non_member_payment() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;
    let group = create_group(&store, &mgr).await;
    // cust is managed by mgr but never enrolled in the group.

    let result = record_uc(&store)
        .execute(&manager_ctx(&mgr), input(group.id, cust.id))
        .await;
    assert!(matches!(result, Err(ChitServiceError::MemberNotFound)));
    assert!(store.payments_by_group(group.id).await.unwrap().is_empty());
    assert!(store.notifications_for_user(cust.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_payment_into_unknown_group() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;

    let result = record_uc(&store)
        .execute(&manager_ctx(&mgr), input(999, cust.id))
        .await;
    assert!(matches!(result, Err(ChitServiceError::GroupNotFound)));
}

#[tokio::test]
async fn should_reject_payment_for_unknown_user() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let group = create_group(&store, &mgr).await;

    let result = record_uc(&store)
        .execute(&manager_ctx(&mgr), input(group.id, 999))
        .await;
    assert!(matches!(result, Err(ChitServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_describe_payment_in_notification_message() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;
    let group = create_group(&store, &mgr).await;
    enroll(&store, &mgr, &group, &cust).await;

    record_uc(&store)
        .execute(&manager_ctx(&mgr), input(group.id, cust.id))
        .await
        .unwrap();

    let notes = store.notifications_for_user(cust.id).await.unwrap();
    let message = &notes[0].message;
    assert!(message.contains("10000"));
    assert!(message.contains("Gold Savers"));
    assert!(message.contains("month 1"));
    assert!(message.contains("paid"));
}
