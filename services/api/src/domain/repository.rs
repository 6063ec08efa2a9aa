#![allow(async_fn_in_trait)]

use crate::domain::types::{
    Auction, AuctionPatch, Bid, ChitGroup, ChitGroupMember, ChitGroupPatch, NewAuction, NewBid,
    NewChitGroup, NewChitGroupMember, NewNotification, NewPayment, NewUser, Notification, Payment,
    PaymentPatch, User, UserPatch,
};
use crate::error::ChitServiceError;

/// Store for user accounts.
///
/// Absent rows come back as `Ok(None)`, never as an error — the usecase layer
/// owns the error taxonomy. `create_user` returns `Ok(None)` when the username
/// is already taken (unique index in the durable backend, serialized
/// check-then-insert in the ephemeral one).
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<Option<User>, ChitServiceError>;
    async fn user(&self, id: i32) -> Result<Option<User>, ChitServiceError>;
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, ChitServiceError>;
    async fn update_user(&self, id: i32, patch: UserPatch)
    -> Result<Option<User>, ChitServiceError>;
    /// The only customer listing in the system — always manager-scoped.
    async fn customers_by_manager(&self, manager_id: i32) -> Result<Vec<User>, ChitServiceError>;
}

/// Store for chit groups.
pub trait ChitGroupStore: Send + Sync {
    async fn create_chit_group(&self, group: NewChitGroup) -> Result<ChitGroup, ChitServiceError>;
    async fn chit_group(&self, id: i32) -> Result<Option<ChitGroup>, ChitServiceError>;
    async fn chit_groups_by_creator(
        &self,
        manager_id: i32,
    ) -> Result<Vec<ChitGroup>, ChitServiceError>;
    /// Resolve membership rows for the user, then the groups they reference.
    async fn chit_groups_for_member(
        &self,
        user_id: i32,
    ) -> Result<Vec<ChitGroup>, ChitServiceError>;
    async fn update_chit_group(
        &self,
        id: i32,
        patch: ChitGroupPatch,
    ) -> Result<Option<ChitGroup>, ChitServiceError>;
}

/// Store for chit group memberships.
pub trait MemberStore: Send + Sync {
    /// Insert a membership. Returns `Ok(None)` if the (group, user) pair
    /// already exists — uniqueness is enforced at the storage layer.
    async fn add_member(
        &self,
        member: NewChitGroupMember,
    ) -> Result<Option<ChitGroupMember>, ChitServiceError>;
    /// Delete a membership. Returns `true` if a row was removed.
    async fn remove_member(
        &self,
        chit_group_id: i32,
        user_id: i32,
    ) -> Result<bool, ChitServiceError>;
    async fn members_of_group(
        &self,
        chit_group_id: i32,
    ) -> Result<Vec<ChitGroupMember>, ChitServiceError>;
    async fn membership(
        &self,
        chit_group_id: i32,
        user_id: i32,
    ) -> Result<Option<ChitGroupMember>, ChitServiceError>;
}

/// Store for auctions.
pub trait AuctionStore: Send + Sync {
    async fn create_auction(&self, auction: NewAuction) -> Result<Auction, ChitServiceError>;
    async fn auction(&self, id: i32) -> Result<Option<Auction>, ChitServiceError>;
    async fn auctions_by_group(
        &self,
        chit_group_id: i32,
    ) -> Result<Vec<Auction>, ChitServiceError>;
    /// Merge the patch into the stored auction. The lifecycle rules live in the
    /// domain layer; this is a plain merge.
    async fn update_auction(
        &self,
        id: i32,
        patch: AuctionPatch,
    ) -> Result<Option<Auction>, ChitServiceError>;
}

/// Store for bids. Append-only; there is no update or delete.
pub trait BidStore: Send + Sync {
    async fn create_bid(&self, bid: NewBid) -> Result<Bid, ChitServiceError>;
    async fn bids_by_auction(&self, auction_id: i32) -> Result<Vec<Bid>, ChitServiceError>;
}

/// Store for payments.
pub trait PaymentStore: Send + Sync {
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment, ChitServiceError>;
    async fn payment(&self, id: i32) -> Result<Option<Payment>, ChitServiceError>;
    async fn payments_by_group(
        &self,
        chit_group_id: i32,
    ) -> Result<Vec<Payment>, ChitServiceError>;
    async fn payments_by_user(&self, user_id: i32) -> Result<Vec<Payment>, ChitServiceError>;
    async fn update_payment(
        &self,
        id: i32,
        patch: PaymentPatch,
    ) -> Result<Option<Payment>, ChitServiceError>;
}

/// Store for notifications.
pub trait NotificationStore: Send + Sync {
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, ChitServiceError>;
    async fn notification(&self, id: i32) -> Result<Option<Notification>, ChitServiceError>;
    /// Newest first.
    async fn notifications_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<Notification>, ChitServiceError>;
    async fn mark_notification_read(
        &self,
        id: i32,
    ) -> Result<Option<Notification>, ChitServiceError>;
}
