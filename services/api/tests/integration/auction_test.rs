//! Auction lifecycle and bid acceptance properties.

use chitfund_api::domain::repository::AuctionStore as _;
use chitfund_api::domain::types::{ActorContext, Auction, AuctionPatch};
use chitfund_api::error::ChitServiceError;
use chitfund_api::infra::mem::MemStore;
use chitfund_api::usecase::auction::{
    ListBidsUseCase, PlaceBidInput, PlaceBidUseCase, ScheduleAuctionInput, ScheduleAuctionUseCase,
    UpdateAuctionUseCase,
};
use chitfund_domain::status::AuctionStatus;

use crate::helpers::*;

async fn schedule(store: &MemStore, actor: &ActorContext, gid: i32) -> Auction {
    ScheduleAuctionUseCase {
        groups: store.clone(),
        auctions: store.clone(),
    }
    .execute(
        actor,
        gid,
        ScheduleAuctionInput {
            auction_date: "2024-02-01".parse().unwrap(),
            month_number: 1,
        },
    )
    .await
    .unwrap()
}

fn update_uc(store: &MemStore) -> UpdateAuctionUseCase<MemStore, MemStore> {
    UpdateAuctionUseCase {
        groups: store.clone(),
        auctions: store.clone(),
    }
}

fn bid_uc(store: &MemStore) -> PlaceBidUseCase<MemStore, MemStore, MemStore> {
    PlaceBidUseCase {
        auctions: store.clone(),
        members: store.clone(),
        bids: store.clone(),
    }
}

fn complete(winner: i32) -> AuctionPatch {
    AuctionPatch {
        status: Some(AuctionStatus::Completed),
        winner_user_id: Some(winner),
        winning_bid: Some(95_000),
        ..Default::default()
    }
}

#[tokio::test]
async fn should_keep_winner_fields_exclusive_to_completed() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;
    let group = create_group(&store, &mgr).await;
    let auction = schedule(&store, &manager_ctx(&mgr), group.id).await;

    // Scheduled: never carries winner fields, and cannot receive them.
    assert!(auction.winner_user_id.is_none() && auction.winning_bid.is_none());
    let sneak = AuctionPatch {
        winner_user_id: Some(cust.id),
        winning_bid: Some(90_000),
        ..Default::default()
    };
    assert!(matches!(
        update_uc(&store)
            .execute(&manager_ctx(&mgr), auction.id, sneak)
            .await,
        Err(ChitServiceError::Validation(_))
    ));

    // Completed: always carries both.
    let done = update_uc(&store)
        .execute(&manager_ctx(&mgr), auction.id, complete(cust.id))
        .await
        .unwrap();
    assert_eq!(done.status, AuctionStatus::Completed);
    assert!(done.winner_user_id.is_some() && done.winning_bid.is_some());
}

#[tokio::test]
async fn should_leave_cancelled_auction_without_winner_fields() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let group = create_group(&store, &mgr).await;
    let auction = schedule(&store, &manager_ctx(&mgr), group.id).await;

    let cancelled = update_uc(&store)
        .execute(
            &manager_ctx(&mgr),
            auction.id,
            AuctionPatch {
                status: Some(AuctionStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cancelled.status, AuctionStatus::Cancelled);
    assert!(cancelled.winner_user_id.is_none() && cancelled.winning_bid.is_none());
}

#[tokio::test]
async fn should_freeze_terminal_auctions_against_any_update() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;
    let group = create_group(&store, &mgr).await;

    let completed = schedule(&store, &manager_ctx(&mgr), group.id).await;
    update_uc(&store)
        .execute(&manager_ctx(&mgr), completed.id, complete(cust.id))
        .await
        .unwrap();
    let cancelled = schedule(&store, &manager_ctx(&mgr), group.id).await;
    update_uc(&store)
        .execute(
            &manager_ctx(&mgr),
            cancelled.id,
            AuctionPatch {
                status: Some(AuctionStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    for auction_id in [completed.id, cancelled.id] {
        for patch in [
            AuctionPatch {
                status: Some(AuctionStatus::Scheduled),
                ..Default::default()
            },
            AuctionPatch {
                auction_date: Some("2024-06-01".parse().unwrap()),
                ..Default::default()
            },
        ] {
            assert!(matches!(
                update_uc(&store)
                    .execute(&manager_ctx(&mgr), auction_id, patch)
                    .await,
                Err(ChitServiceError::InvalidTransition)
            ));
        }
    }

    let stored = store.auction(completed.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AuctionStatus::Completed);
}

#[tokio::test]
async fn should_gate_bids_on_membership_and_scheduled_status() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let member = register_customer(&store, &mgr, "ravi").await;
    let outsider = register_customer(&store, &mgr, "kiran").await;
    let group = create_group(&store, &mgr).await;
    enroll(&store, &mgr, &group, &member).await;
    let auction = schedule(&store, &manager_ctx(&mgr), group.id).await;

    // Non-member fails.
    assert!(matches!(
        bid_uc(&store)
            .execute(
                &customer_ctx(&outsider),
                auction.id,
                PlaceBidInput { bid_amount: 91_000 }
            )
            .await,
        Err(ChitServiceError::Forbidden)
    ));

    // Member succeeds and the bid is retrievable via the auction's bid list.
    let bid = bid_uc(&store)
        .execute(
            &customer_ctx(&member),
            auction.id,
            PlaceBidInput { bid_amount: 92_000 },
        )
        .await
        .unwrap();
    let bids = ListBidsUseCase {
        groups: store.clone(),
        members: store.clone(),
        auctions: store.clone(),
        bids: store.clone(),
    }
    .execute(&customer_ctx(&member), auction.id)
    .await
    .unwrap();
    assert_eq!(bids.iter().map(|b| b.id).collect::<Vec<_>>(), vec![bid.id]);

    // Completed and cancelled auctions reject every bid.
    update_uc(&store)
        .execute(&manager_ctx(&mgr), auction.id, complete(member.id))
        .await
        .unwrap();
    assert!(matches!(
        bid_uc(&store)
            .execute(
                &customer_ctx(&member),
                auction.id,
                PlaceBidInput { bid_amount: 90_000 }
            )
            .await,
        Err(ChitServiceError::AuctionClosed)
    ));

    let second = schedule(&store, &manager_ctx(&mgr), group.id).await;
    update_uc(&store)
        .execute(
            &manager_ctx(&mgr),
            second.id,
            AuctionPatch {
                status: Some(AuctionStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(matches!(
        bid_uc(&store)
            .execute(
                &customer_ctx(&member),
                second.id,
                PlaceBidInput { bid_amount: 90_000 }
            )
            .await,
        Err(ChitServiceError::AuctionClosed)
    ));
}
