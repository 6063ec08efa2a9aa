use chrono::{DateTime, NaiveDate, Utc};

use chitfund_domain::role::UserRole;
use chitfund_domain::status::{AuctionStatus, NotificationKind, PaymentStatus};

/// Verified request identity, resolved once per request from the session and
/// threaded explicitly into every usecase and guard.
#[derive(Debug, Clone, Copy)]
pub struct ActorContext {
    pub user_id: i32,
    pub role: UserRole,
}

/// Account record. `password` is the argon2 PHC string, never cleartext.
/// `manager_id` is `Some` iff `role` is `Customer`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub is_first_login: bool,
    pub manager_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub is_first_login: bool,
    pub manager_id: Option<i32>,
}

/// Partial update merged into a stored user.
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_first_login: Option<bool>,
}

/// A rotating savings pool owned by the manager in `created_by`.
#[derive(Debug, Clone)]
pub struct ChitGroup {
    pub id: i32,
    pub name: String,
    pub value: i64,
    pub duration_months: i32,
    pub members_count: i32,
    pub start_date: NaiveDate,
    pub is_active: bool,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

pub struct NewChitGroup {
    pub name: String,
    pub value: i64,
    pub duration_months: i32,
    pub members_count: i32,
    pub start_date: NaiveDate,
    pub is_active: bool,
    pub created_by: i32,
}

#[derive(Debug, Default, Clone)]
pub struct ChitGroupPatch {
    pub name: Option<String>,
    pub value: Option<i64>,
    pub duration_months: Option<i32>,
    pub members_count: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// Membership join row tying a customer to a chit group.
#[derive(Debug, Clone)]
pub struct ChitGroupMember {
    pub id: i32,
    pub chit_group_id: i32,
    pub user_id: i32,
    pub join_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

pub struct NewChitGroupMember {
    pub chit_group_id: i32,
    pub user_id: i32,
    pub join_date: NaiveDate,
}

/// Monthly auction for a chit group. Winner fields are set together, only on
/// the transition to `Completed`.
#[derive(Debug, Clone)]
pub struct Auction {
    pub id: i32,
    pub chit_group_id: i32,
    pub auction_date: NaiveDate,
    pub month_number: i32,
    pub status: AuctionStatus,
    pub winner_user_id: Option<i32>,
    pub winning_bid: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Auctions are always created `Scheduled` with no winner fields.
pub struct NewAuction {
    pub chit_group_id: i32,
    pub auction_date: NaiveDate,
    pub month_number: i32,
}

#[derive(Debug, Default, Clone)]
pub struct AuctionPatch {
    pub auction_date: Option<NaiveDate>,
    pub month_number: Option<i32>,
    pub status: Option<AuctionStatus>,
    pub winner_user_id: Option<i32>,
    pub winning_bid: Option<i64>,
}

/// Bid placed by a member while the auction is scheduled. Append-only.
#[derive(Debug, Clone)]
pub struct Bid {
    pub id: i32,
    pub auction_id: i32,
    pub user_id: i32,
    pub bid_amount: i64,
    pub bid_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBid {
    pub auction_id: i32,
    pub user_id: i32,
    pub bid_amount: i64,
    pub bid_time: DateTime<Utc>,
}

/// Payment made by a member toward a chit group month.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i32,
    pub chit_group_id: i32,
    pub user_id: i32,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub month_number: i32,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

pub struct NewPayment {
    pub chit_group_id: i32,
    pub user_id: i32,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub month_number: i32,
    pub status: PaymentStatus,
}

#[derive(Debug, Default, Clone)]
pub struct PaymentPatch {
    pub amount: Option<i64>,
    pub payment_date: Option<NaiveDate>,
    pub month_number: Option<i32>,
    pub status: Option<PaymentStatus>,
}

/// User-addressed notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub message: String,
    pub is_read: bool,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

pub struct NewNotification {
    pub user_id: i32,
    pub message: String,
    pub kind: NotificationKind,
}
