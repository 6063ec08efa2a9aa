//! End-to-end walk through one chit group cycle:
//! create group → enroll → schedule auction → complete → record payment.

use chitfund_api::domain::repository::{MemberStore as _, NotificationStore as _};
use chitfund_api::domain::types::AuctionPatch;
use chitfund_api::error::ChitServiceError;
use chitfund_api::infra::mem::MemStore;
use chitfund_api::usecase::auction::{
    ScheduleAuctionInput, ScheduleAuctionUseCase, UpdateAuctionUseCase,
};
use chitfund_api::usecase::payment::{RecordPaymentInput, RecordPaymentUseCase};
use chitfund_domain::status::{AuctionStatus, NotificationKind, PaymentStatus};

use crate::helpers::*;

#[tokio::test]
async fn should_run_one_full_chit_cycle() {
    let store = MemStore::new();

    // Manager M creates group G.
    let m = register_manager(&store, "boss").await;
    let g = create_group(&store, &m).await;
    assert!(g.is_active);
    assert_eq!(g.created_by, m.id);
    assert_eq!(g.value, 100_000);
    assert_eq!(g.duration_months, 10);
    assert_eq!(g.members_count, 5);

    // M adds customer C → exactly one membership.
    let c = register_customer(&store, &m, "ravi").await;
    enroll(&store, &m, &g, &c).await;
    assert_eq!(store.members_of_group(g.id).await.unwrap().len(), 1);

    // M schedules the month-1 auction.
    let auction = ScheduleAuctionUseCase {
        groups: store.clone(),
        auctions: store.clone(),
    }
    .execute(
        &manager_ctx(&m),
        g.id,
        ScheduleAuctionInput {
            auction_date: "2024-02-01".parse().unwrap(),
            month_number: 1,
        },
    )
    .await
    .unwrap();
    assert_eq!(auction.status, AuctionStatus::Scheduled);

    // M completes it with C as winner.
    let update = UpdateAuctionUseCase {
        groups: store.clone(),
        auctions: store.clone(),
    };
    let done = update
        .execute(
            &manager_ctx(&m),
            auction.id,
            AuctionPatch {
                status: Some(AuctionStatus::Completed),
                winner_user_id: Some(c.id),
                winning_bid: Some(95_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(done.status, AuctionStatus::Completed);
    assert_eq!(done.winner_user_id, Some(c.id));
    assert_eq!(done.winning_bid, Some(95_000));

    // Re-opening the completed auction fails.
    let reopen = update
        .execute(
            &manager_ctx(&m),
            auction.id,
            AuctionPatch {
                status: Some(AuctionStatus::Scheduled),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(reopen, Err(ChitServiceError::InvalidTransition)));

    // M records C's month-1 payment → one payment, one payment notification.
    let payment = RecordPaymentUseCase {
        groups: store.clone(),
        members: store.clone(),
        users: store.clone(),
        payments: store.clone(),
        notifications: store.clone(),
    }
    .execute(
        &manager_ctx(&m),
        RecordPaymentInput {
            chit_group_id: g.id,
            user_id: c.id,
            amount: 10_000,
            payment_date: "2024-02-05".parse().unwrap(),
            month_number: 1,
            status: PaymentStatus::Paid,
        },
    )
    .await
    .unwrap();
    assert_eq!(payment.status, PaymentStatus::Paid);

    let notes = store.notifications_for_user(c.id).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Payment);
}
