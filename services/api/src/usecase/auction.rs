use chrono::{NaiveDate, Utc};

use crate::domain::guard;
use crate::domain::lifecycle;
use crate::domain::repository::{AuctionStore, BidStore, ChitGroupStore, MemberStore};
use crate::domain::types::{ActorContext, Auction, AuctionPatch, Bid, NewAuction, NewBid};
use crate::domain::validate::{validate_amount, validate_month_number};
use crate::error::ChitServiceError;

// ── ScheduleAuction ──────────────────────────────────────────────────────────

pub struct ScheduleAuctionInput {
    pub auction_date: NaiveDate,
    pub month_number: i32,
}

pub struct ScheduleAuctionUseCase<G: ChitGroupStore, A: AuctionStore> {
    pub groups: G,
    pub auctions: A,
}

impl<G: ChitGroupStore, A: AuctionStore> ScheduleAuctionUseCase<G, A> {
    /// New auctions always start `scheduled`; winner fields cannot be supplied
    /// at creation.
    pub async fn execute(
        &self,
        actor: &ActorContext,
        chit_group_id: i32,
        input: ScheduleAuctionInput,
    ) -> Result<Auction, ChitServiceError> {
        let group = self
            .groups
            .chit_group(chit_group_id)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)?;
        guard::require_group_owner(actor, &group)?;
        validate_month_number(input.month_number)?;

        self.auctions
            .create_auction(NewAuction {
                chit_group_id,
                auction_date: input.auction_date,
                month_number: input.month_number,
            })
            .await
    }
}

// ── ListAuctions ─────────────────────────────────────────────────────────────

pub struct ListAuctionsUseCase<G: ChitGroupStore, M: MemberStore, A: AuctionStore> {
    pub groups: G,
    pub members: M,
    pub auctions: A,
}

impl<G: ChitGroupStore, M: MemberStore, A: AuctionStore> ListAuctionsUseCase<G, M, A> {
    pub async fn execute(
        &self,
        actor: &ActorContext,
        chit_group_id: i32,
    ) -> Result<Vec<Auction>, ChitServiceError> {
        let group = self
            .groups
            .chit_group(chit_group_id)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)?;
        let membership = self.members.membership(chit_group_id, actor.user_id).await?;
        guard::require_group_access(actor, &group, membership.as_ref())?;
        self.auctions.auctions_by_group(chit_group_id).await
    }
}

// ── UpdateAuction (lifecycle transition) ─────────────────────────────────────

pub struct UpdateAuctionUseCase<G: ChitGroupStore, A: AuctionStore> {
    pub groups: G,
    pub auctions: A,
}

impl<G: ChitGroupStore, A: AuctionStore> UpdateAuctionUseCase<G, A> {
    pub async fn execute(
        &self,
        actor: &ActorContext,
        auction_id: i32,
        patch: AuctionPatch,
    ) -> Result<Auction, ChitServiceError> {
        let auction = self
            .auctions
            .auction(auction_id)
            .await?
            .ok_or(ChitServiceError::AuctionNotFound)?;
        let group = self
            .groups
            .chit_group(auction.chit_group_id)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)?;
        guard::require_group_owner(actor, &group)?;

        if let Some(month_number) = patch.month_number {
            validate_month_number(month_number)?;
        }
        if let Some(winning_bid) = patch.winning_bid {
            validate_amount(winning_bid, "winning_bid")?;
        }
        lifecycle::check_update(&auction, &patch)?;

        self.auctions
            .update_auction(auction_id, patch)
            .await?
            .ok_or(ChitServiceError::AuctionNotFound)
    }
}

// ── PlaceBid ─────────────────────────────────────────────────────────────────

pub struct PlaceBidInput {
    pub bid_amount: i64,
}

pub struct PlaceBidUseCase<A: AuctionStore, M: MemberStore, B: BidStore> {
    pub auctions: A,
    pub members: M,
    pub bids: B,
}

impl<A: AuctionStore, M: MemberStore, B: BidStore> PlaceBidUseCase<A, M, B> {
    /// Bids are accepted only from members of the auction's group, and only
    /// while the auction is scheduled.
    pub async fn execute(
        &self,
        actor: &ActorContext,
        auction_id: i32,
        input: PlaceBidInput,
    ) -> Result<Bid, ChitServiceError> {
        let auction = self
            .auctions
            .auction(auction_id)
            .await?
            .ok_or(ChitServiceError::AuctionNotFound)?;

        if auction.status.is_terminal() {
            return Err(ChitServiceError::AuctionClosed);
        }

        let membership = self
            .members
            .membership(auction.chit_group_id, actor.user_id)
            .await?;
        if membership.is_none() {
            tracing::warn!(
                actor_id = actor.user_id,
                auction_id,
                chit_group_id = auction.chit_group_id,
                "bid attempt by non-member"
            );
            return Err(ChitServiceError::Forbidden);
        }
        validate_amount(input.bid_amount, "bid_amount")?;

        self.bids
            .create_bid(NewBid {
                auction_id,
                user_id: actor.user_id,
                bid_amount: input.bid_amount,
                bid_time: Utc::now(),
            })
            .await
    }
}

// ── ListBids ─────────────────────────────────────────────────────────────────

pub struct ListBidsUseCase<G: ChitGroupStore, M: MemberStore, A: AuctionStore, B: BidStore> {
    pub groups: G,
    pub members: M,
    pub auctions: A,
    pub bids: B,
}

impl<G: ChitGroupStore, M: MemberStore, A: AuctionStore, B: BidStore>
    ListBidsUseCase<G, M, A, B>
{
    pub async fn execute(
        &self,
        actor: &ActorContext,
        auction_id: i32,
    ) -> Result<Vec<Bid>, ChitServiceError> {
        let auction = self
            .auctions
            .auction(auction_id)
            .await?
            .ok_or(ChitServiceError::AuctionNotFound)?;
        let group = self
            .groups
            .chit_group(auction.chit_group_id)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)?;
        let membership = self
            .members
            .membership(auction.chit_group_id, actor.user_id)
            .await?;
        guard::require_group_access(actor, &group, membership.as_ref())?;
        self.bids.bids_by_auction(auction_id).await
    }
}
