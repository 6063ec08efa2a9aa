//! Ephemeral in-memory backend.
//!
//! All tables and per-entity id sequences live behind one `Mutex`; no await
//! happens under the lock. The lock is also the serialization point for the
//! membership uniqueness check, so the check-then-insert sequence cannot race.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::domain::repository::{
    AuctionStore, BidStore, ChitGroupStore, MemberStore, NotificationStore, PaymentStore,
    UserStore,
};
use crate::domain::types::{
    Auction, AuctionPatch, Bid, ChitGroup, ChitGroupMember, ChitGroupPatch, NewAuction, NewBid,
    NewChitGroup, NewChitGroupMember, NewNotification, NewPayment, NewUser, Notification, Payment,
    PaymentPatch, User, UserPatch,
};
use crate::error::ChitServiceError;
use chitfund_domain::role::UserRole;
use chitfund_domain::status::AuctionStatus;

#[derive(Default)]
struct Tables {
    users: HashMap<i32, User>,
    chit_groups: HashMap<i32, ChitGroup>,
    members: HashMap<i32, ChitGroupMember>,
    auctions: HashMap<i32, Auction>,
    bids: HashMap<i32, Bid>,
    payments: HashMap<i32, Payment>,
    notifications: HashMap<i32, Notification>,
    user_seq: i32,
    chit_group_seq: i32,
    member_seq: i32,
    auction_seq: i32,
    bid_seq: i32,
    payment_seq: i32,
    notification_seq: i32,
}

fn next(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

/// In-memory store. Cheap to clone; clones share the same tables.
#[derive(Clone, Default)]
pub struct MemStore {
    inner: Arc<Mutex<Tables>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sorted_by_id<T: Clone>(items: impl Iterator<Item = T>, id: impl Fn(&T) -> i32) -> Vec<T> {
    let mut out: Vec<T> = items.collect();
    out.sort_by_key(|t| id(t));
    out
}

impl UserStore for MemStore {
    async fn create_user(&self, user: NewUser) -> Result<Option<User>, ChitServiceError> {
        let mut t = self.lock();
        if t.users.values().any(|u| u.username == user.username) {
            return Ok(None);
        }
        let id = next(&mut t.user_seq);
        let record = User {
            id,
            username: user.username,
            password: user.password,
            name: user.name,
            phone: user.phone,
            email: user.email,
            role: user.role,
            is_first_login: user.is_first_login,
            manager_id: user.manager_id,
            created_at: Utc::now(),
        };
        t.users.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn user(&self, id: i32) -> Result<Option<User>, ChitServiceError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, ChitServiceError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn update_user(
        &self,
        id: i32,
        patch: UserPatch,
    ) -> Result<Option<User>, ChitServiceError> {
        let mut t = self.lock();
        let Some(user) = t.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(password) = patch.password {
            user.password = password;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(phone) = patch.phone {
            user.phone = phone;
        }
        if let Some(email) = patch.email {
            user.email = Some(email);
        }
        if let Some(is_first_login) = patch.is_first_login {
            user.is_first_login = is_first_login;
        }
        Ok(Some(user.clone()))
    }

    async fn customers_by_manager(&self, manager_id: i32) -> Result<Vec<User>, ChitServiceError> {
        let t = self.lock();
        Ok(sorted_by_id(
            t.users
                .values()
                .filter(|u| u.role == UserRole::Customer && u.manager_id == Some(manager_id))
                .cloned(),
            |u| u.id,
        ))
    }
}

impl ChitGroupStore for MemStore {
    async fn create_chit_group(&self, group: NewChitGroup) -> Result<ChitGroup, ChitServiceError> {
        let mut t = self.lock();
        let id = next(&mut t.chit_group_seq);
        let record = ChitGroup {
            id,
            name: group.name,
            value: group.value,
            duration_months: group.duration_months,
            members_count: group.members_count,
            start_date: group.start_date,
            is_active: group.is_active,
            created_by: group.created_by,
            created_at: Utc::now(),
        };
        t.chit_groups.insert(id, record.clone());
        Ok(record)
    }

    async fn chit_group(&self, id: i32) -> Result<Option<ChitGroup>, ChitServiceError> {
        Ok(self.lock().chit_groups.get(&id).cloned())
    }

    async fn chit_groups_by_creator(
        &self,
        manager_id: i32,
    ) -> Result<Vec<ChitGroup>, ChitServiceError> {
        let t = self.lock();
        Ok(sorted_by_id(
            t.chit_groups
                .values()
                .filter(|g| g.created_by == manager_id)
                .cloned(),
            |g| g.id,
        ))
    }

    async fn chit_groups_for_member(
        &self,
        user_id: i32,
    ) -> Result<Vec<ChitGroup>, ChitServiceError> {
        let t = self.lock();
        let group_ids: Vec<i32> = t
            .members
            .values()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.chit_group_id)
            .collect();
        Ok(sorted_by_id(
            group_ids
                .into_iter()
                .filter_map(|gid| t.chit_groups.get(&gid).cloned()),
            |g| g.id,
        ))
    }

    async fn update_chit_group(
        &self,
        id: i32,
        patch: ChitGroupPatch,
    ) -> Result<Option<ChitGroup>, ChitServiceError> {
        let mut t = self.lock();
        let Some(group) = t.chit_groups.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            group.name = name;
        }
        if let Some(value) = patch.value {
            group.value = value;
        }
        if let Some(duration_months) = patch.duration_months {
            group.duration_months = duration_months;
        }
        if let Some(members_count) = patch.members_count {
            group.members_count = members_count;
        }
        if let Some(start_date) = patch.start_date {
            group.start_date = start_date;
        }
        if let Some(is_active) = patch.is_active {
            group.is_active = is_active;
        }
        Ok(Some(group.clone()))
    }
}

impl MemberStore for MemStore {
    async fn add_member(
        &self,
        member: NewChitGroupMember,
    ) -> Result<Option<ChitGroupMember>, ChitServiceError> {
        // Check-then-insert is safe: the whole sequence runs under one lock.
        let mut t = self.lock();
        if t.members
            .values()
            .any(|m| m.chit_group_id == member.chit_group_id && m.user_id == member.user_id)
        {
            return Ok(None);
        }
        let id = next(&mut t.member_seq);
        let record = ChitGroupMember {
            id,
            chit_group_id: member.chit_group_id,
            user_id: member.user_id,
            join_date: member.join_date,
            created_at: Utc::now(),
        };
        t.members.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn remove_member(
        &self,
        chit_group_id: i32,
        user_id: i32,
    ) -> Result<bool, ChitServiceError> {
        let mut t = self.lock();
        let found = t
            .members
            .values()
            .find(|m| m.chit_group_id == chit_group_id && m.user_id == user_id)
            .map(|m| m.id);
        Ok(match found {
            Some(id) => t.members.remove(&id).is_some(),
            None => false,
        })
    }

    async fn members_of_group(
        &self,
        chit_group_id: i32,
    ) -> Result<Vec<ChitGroupMember>, ChitServiceError> {
        let t = self.lock();
        Ok(sorted_by_id(
            t.members
                .values()
                .filter(|m| m.chit_group_id == chit_group_id)
                .cloned(),
            |m| m.id,
        ))
    }

    async fn membership(
        &self,
        chit_group_id: i32,
        user_id: i32,
    ) -> Result<Option<ChitGroupMember>, ChitServiceError> {
        Ok(self
            .lock()
            .members
            .values()
            .find(|m| m.chit_group_id == chit_group_id && m.user_id == user_id)
            .cloned())
    }
}

impl AuctionStore for MemStore {
    async fn create_auction(&self, auction: NewAuction) -> Result<Auction, ChitServiceError> {
        let mut t = self.lock();
        let id = next(&mut t.auction_seq);
        let record = Auction {
            id,
            chit_group_id: auction.chit_group_id,
            auction_date: auction.auction_date,
            month_number: auction.month_number,
            status: AuctionStatus::Scheduled,
            winner_user_id: None,
            winning_bid: None,
            created_at: Utc::now(),
        };
        t.auctions.insert(id, record.clone());
        Ok(record)
    }

    async fn auction(&self, id: i32) -> Result<Option<Auction>, ChitServiceError> {
        Ok(self.lock().auctions.get(&id).cloned())
    }

    async fn auctions_by_group(
        &self,
        chit_group_id: i32,
    ) -> Result<Vec<Auction>, ChitServiceError> {
        let t = self.lock();
        Ok(sorted_by_id(
            t.auctions
                .values()
                .filter(|a| a.chit_group_id == chit_group_id)
                .cloned(),
            |a| a.id,
        ))
    }

    async fn update_auction(
        &self,
        id: i32,
        patch: AuctionPatch,
    ) -> Result<Option<Auction>, ChitServiceError> {
        let mut t = self.lock();
        let Some(auction) = t.auctions.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(auction_date) = patch.auction_date {
            auction.auction_date = auction_date;
        }
        if let Some(month_number) = patch.month_number {
            auction.month_number = month_number;
        }
        if let Some(status) = patch.status {
            auction.status = status;
        }
        if let Some(winner_user_id) = patch.winner_user_id {
            auction.winner_user_id = Some(winner_user_id);
        }
        if let Some(winning_bid) = patch.winning_bid {
            auction.winning_bid = Some(winning_bid);
        }
        Ok(Some(auction.clone()))
    }
}

impl BidStore for MemStore {
    async fn create_bid(&self, bid: NewBid) -> Result<Bid, ChitServiceError> {
        let mut t = self.lock();
        let id = next(&mut t.bid_seq);
        let record = Bid {
            id,
            auction_id: bid.auction_id,
            user_id: bid.user_id,
            bid_amount: bid.bid_amount,
            bid_time: bid.bid_time,
            created_at: Utc::now(),
        };
        t.bids.insert(id, record.clone());
        Ok(record)
    }

    async fn bids_by_auction(&self, auction_id: i32) -> Result<Vec<Bid>, ChitServiceError> {
        let t = self.lock();
        Ok(sorted_by_id(
            t.bids
                .values()
                .filter(|b| b.auction_id == auction_id)
                .cloned(),
            |b| b.id,
        ))
    }
}

impl PaymentStore for MemStore {
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment, ChitServiceError> {
        let mut t = self.lock();
        let id = next(&mut t.payment_seq);
        let record = Payment {
            id,
            chit_group_id: payment.chit_group_id,
            user_id: payment.user_id,
            amount: payment.amount,
            payment_date: payment.payment_date,
            month_number: payment.month_number,
            status: payment.status,
            created_at: Utc::now(),
        };
        t.payments.insert(id, record.clone());
        Ok(record)
    }

    async fn payment(&self, id: i32) -> Result<Option<Payment>, ChitServiceError> {
        Ok(self.lock().payments.get(&id).cloned())
    }

    async fn payments_by_group(
        &self,
        chit_group_id: i32,
    ) -> Result<Vec<Payment>, ChitServiceError> {
        let t = self.lock();
        Ok(sorted_by_id(
            t.payments
                .values()
                .filter(|p| p.chit_group_id == chit_group_id)
                .cloned(),
            |p| p.id,
        ))
    }

    async fn payments_by_user(&self, user_id: i32) -> Result<Vec<Payment>, ChitServiceError> {
        let t = self.lock();
        Ok(sorted_by_id(
            t.payments
                .values()
                .filter(|p| p.user_id == user_id)
                .cloned(),
            |p| p.id,
        ))
    }

    async fn update_payment(
        &self,
        id: i32,
        patch: PaymentPatch,
    ) -> Result<Option<Payment>, ChitServiceError> {
        let mut t = self.lock();
        let Some(payment) = t.payments.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(amount) = patch.amount {
            payment.amount = amount;
        }
        if let Some(payment_date) = patch.payment_date {
            payment.payment_date = payment_date;
        }
        if let Some(month_number) = patch.month_number {
            payment.month_number = month_number;
        }
        if let Some(status) = patch.status {
            payment.status = status;
        }
        Ok(Some(payment.clone()))
    }
}

impl NotificationStore for MemStore {
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, ChitServiceError> {
        let mut t = self.lock();
        let id = next(&mut t.notification_seq);
        let record = Notification {
            id,
            user_id: notification.user_id,
            message: notification.message,
            is_read: false,
            kind: notification.kind,
            created_at: Utc::now(),
        };
        t.notifications.insert(id, record.clone());
        Ok(record)
    }

    async fn notification(&self, id: i32) -> Result<Option<Notification>, ChitServiceError> {
        Ok(self.lock().notifications.get(&id).cloned())
    }

    async fn notifications_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<Notification>, ChitServiceError> {
        let t = self.lock();
        let mut out: Vec<Notification> = t
            .notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        // Newest first; ids break created_at ties since the clock is coarse.
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn mark_notification_read(
        &self,
        id: i32,
    ) -> Result<Option<Notification>, ChitServiceError> {
        let mut t = self.lock();
        let Some(notification) = t.notifications.get_mut(&id) else {
            return Ok(None);
        };
        notification.is_read = true;
        Ok(Some(notification.clone()))
    }
}
