use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use chitfund_domain::status::AuctionStatus;

use crate::domain::types::{ActorContext, Auction, AuctionPatch, Bid};
use crate::error::ChitServiceError;
use crate::state::AppState;
use crate::usecase::auction::{
    ListAuctionsUseCase, ListBidsUseCase, PlaceBidInput, PlaceBidUseCase, ScheduleAuctionInput,
    ScheduleAuctionUseCase, UpdateAuctionUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AuctionResponse {
    pub id: i32,
    pub chit_group_id: i32,
    pub auction_date: NaiveDate,
    pub month_number: i32,
    pub status: AuctionStatus,
    pub winner_user_id: Option<i32>,
    pub winning_bid: Option<i64>,
    #[serde(serialize_with = "chitfund_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Auction> for AuctionResponse {
    fn from(auction: Auction) -> Self {
        Self {
            id: auction.id,
            chit_group_id: auction.chit_group_id,
            auction_date: auction.auction_date,
            month_number: auction.month_number,
            status: auction.status,
            winner_user_id: auction.winner_user_id,
            winning_bid: auction.winning_bid,
            created_at: auction.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct BidResponse {
    pub id: i32,
    pub auction_id: i32,
    pub user_id: i32,
    pub bid_amount: i64,
    #[serde(serialize_with = "chitfund_core::serde::to_rfc3339_ms")]
    pub bid_time: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "chitfund_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Bid> for BidResponse {
    fn from(bid: Bid) -> Self {
        Self {
            id: bid.id,
            auction_id: bid.auction_id,
            user_id: bid.user_id,
            bid_amount: bid.bid_amount,
            bid_time: bid.bid_time,
            created_at: bid.created_at,
        }
    }
}

// ── GET /chitgroups/{id}/auctions ────────────────────────────────────────────

pub async fn list_auctions(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(chit_group_id): Path<i32>,
) -> Result<Json<Vec<AuctionResponse>>, ChitServiceError> {
    let uc = ListAuctionsUseCase {
        groups: state.store(),
        members: state.store(),
        auctions: state.store(),
    };
    let auctions = uc.execute(&actor, chit_group_id).await?;
    Ok(Json(auctions.into_iter().map(AuctionResponse::from).collect()))
}

// ── POST /chitgroups/{id}/auctions ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ScheduleAuctionRequest {
    pub auction_date: NaiveDate,
    pub month_number: i32,
}

pub async fn schedule_auction(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(chit_group_id): Path<i32>,
    Json(body): Json<ScheduleAuctionRequest>,
) -> Result<(StatusCode, Json<AuctionResponse>), ChitServiceError> {
    let uc = ScheduleAuctionUseCase {
        groups: state.store(),
        auctions: state.store(),
    };
    let auction = uc
        .execute(
            &actor,
            chit_group_id,
            ScheduleAuctionInput {
                auction_date: body.auction_date,
                month_number: body.month_number,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(auction.into())))
}

// ── PUT /auctions/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateAuctionRequest {
    pub auction_date: Option<NaiveDate>,
    pub month_number: Option<i32>,
    pub status: Option<AuctionStatus>,
    pub winner_user_id: Option<i32>,
    pub winning_bid: Option<i64>,
}

pub async fn update_auction(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateAuctionRequest>,
) -> Result<Json<AuctionResponse>, ChitServiceError> {
    let uc = UpdateAuctionUseCase {
        groups: state.store(),
        auctions: state.store(),
    };
    let patch = AuctionPatch {
        auction_date: body.auction_date,
        month_number: body.month_number,
        status: body.status,
        winner_user_id: body.winner_user_id,
        winning_bid: body.winning_bid,
    };
    let auction = uc.execute(&actor, id, patch).await?;
    Ok(Json(auction.into()))
}

// ── GET /auctions/{id}/bids ──────────────────────────────────────────────────

pub async fn list_bids(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(auction_id): Path<i32>,
) -> Result<Json<Vec<BidResponse>>, ChitServiceError> {
    let uc = ListBidsUseCase {
        groups: state.store(),
        members: state.store(),
        auctions: state.store(),
        bids: state.store(),
    };
    let bids = uc.execute(&actor, auction_id).await?;
    Ok(Json(bids.into_iter().map(BidResponse::from).collect()))
}

// ── POST /auctions/{id}/bids ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PlaceBidRequest {
    pub bid_amount: i64,
}

pub async fn place_bid(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(auction_id): Path<i32>,
    Json(body): Json<PlaceBidRequest>,
) -> Result<(StatusCode, Json<BidResponse>), ChitServiceError> {
    let uc = PlaceBidUseCase {
        auctions: state.store(),
        members: state.store(),
        bids: state.store(),
    };
    let bid = uc
        .execute(
            &actor,
            auction_id,
            PlaceBidInput {
                bid_amount: body.bid_amount,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(bid.into())))
}
