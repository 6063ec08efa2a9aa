//! Durable backend over sea-orm.
//!
//! Identity comes from the SQL sequences behind each table's auto-increment
//! primary key. Duplicate-prone inserts (username, membership pair) lean on
//! unique indexes and map the violation to `Ok(None)`.

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};

use chitfund_api_schema::{
    auctions, bids, chit_group_members, chit_groups, notifications, payments, users,
};
use chitfund_domain::role::UserRole;
use chitfund_domain::status::{AuctionStatus, NotificationKind, PaymentStatus};

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

/// sea-orm backed store. Cheap to clone; the connection is pooled.
#[derive(Clone)]
pub struct DbStore {
    pub db: DatabaseConnection,
}

impl DbStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── Model ↔ domain conversions ───────────────────────────────────────────────

fn user_from_model(m: users::Model) -> Result<User, ChitServiceError> {
    let role = UserRole::from_str_value(&m.role)
        .ok_or_else(|| anyhow::anyhow!("unknown role value in users.{}: {}", m.id, m.role))?;
    Ok(User {
        id: m.id,
        username: m.username,
        password: m.password,
        name: m.name,
        phone: m.phone,
        email: m.email,
        role,
        is_first_login: m.is_first_login,
        manager_id: m.manager_id,
        created_at: m.created_at,
    })
}

fn group_from_model(m: chit_groups::Model) -> ChitGroup {
    ChitGroup {
        id: m.id,
        name: m.name,
        value: m.value,
        duration_months: m.duration_months,
        members_count: m.members_count,
        start_date: m.start_date,
        is_active: m.is_active,
        created_by: m.created_by,
        created_at: m.created_at,
    }
}

fn member_from_model(m: chit_group_members::Model) -> ChitGroupMember {
    ChitGroupMember {
        id: m.id,
        chit_group_id: m.chit_group_id,
        user_id: m.user_id,
        join_date: m.join_date,
        created_at: m.created_at,
    }
}

fn auction_from_model(m: auctions::Model) -> Result<Auction, ChitServiceError> {
    let status = AuctionStatus::from_str_value(&m.status).ok_or_else(|| {
        anyhow::anyhow!("unknown status value in auctions.{}: {}", m.id, m.status)
    })?;
    Ok(Auction {
        id: m.id,
        chit_group_id: m.chit_group_id,
        auction_date: m.auction_date,
        month_number: m.month_number,
        status,
        winner_user_id: m.winner_user_id,
        winning_bid: m.winning_bid,
        created_at: m.created_at,
    })
}

fn bid_from_model(m: bids::Model) -> Bid {
    Bid {
        id: m.id,
        auction_id: m.auction_id,
        user_id: m.user_id,
        bid_amount: m.bid_amount,
        bid_time: m.bid_time,
        created_at: m.created_at,
    }
}

fn payment_from_model(m: payments::Model) -> Result<Payment, ChitServiceError> {
    let status = PaymentStatus::from_str_value(&m.status).ok_or_else(|| {
        anyhow::anyhow!("unknown status value in payments.{}: {}", m.id, m.status)
    })?;
    Ok(Payment {
        id: m.id,
        chit_group_id: m.chit_group_id,
        user_id: m.user_id,
        amount: m.amount,
        payment_date: m.payment_date,
        month_number: m.month_number,
        status,
        created_at: m.created_at,
    })
}

fn notification_from_model(m: notifications::Model) -> Result<Notification, ChitServiceError> {
    let kind = NotificationKind::from_str_value(&m.kind).ok_or_else(|| {
        anyhow::anyhow!("unknown kind value in notifications.{}: {}", m.id, m.kind)
    })?;
    Ok(Notification {
        id: m.id,
        user_id: m.user_id,
        message: m.message,
        is_read: m.is_read,
        kind,
        created_at: m.created_at,
    })
}

// ── User store ───────────────────────────────────────────────────────────────

impl UserStore for DbStore {
    async fn create_user(&self, user: NewUser) -> Result<Option<User>, ChitServiceError> {
        let am = users::ActiveModel {
            username: Set(user.username),
            password: Set(user.password),
            name: Set(user.name),
            phone: Set(user.phone),
            email: Set(user.email),
            role: Set(user.role.as_str().to_owned()),
            is_first_login: Set(user.is_first_login),
            manager_id: Set(user.manager_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        match am.insert(&self.db).await {
            Ok(model) => Ok(Some(user_from_model(model)?)),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn user(&self, id: i32) -> Result<Option<User>, ChitServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, ChitServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn update_user(
        &self,
        id: i32,
        patch: UserPatch,
    ) -> Result<Option<User>, ChitServiceError> {
        let Some(current) = self.user(id).await? else {
            return Ok(None);
        };
        // An UPDATE with no changed columns is a sea-orm error, not a no-op.
        if patch.password.is_none()
            && patch.name.is_none()
            && patch.phone.is_none()
            && patch.email.is_none()
            && patch.is_first_login.is_none()
        {
            return Ok(Some(current));
        }
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(password) = patch.password {
            am.password = Set(password);
        }
        if let Some(name) = patch.name {
            am.name = Set(name);
        }
        if let Some(phone) = patch.phone {
            am.phone = Set(phone);
        }
        if let Some(email) = patch.email {
            am.email = Set(Some(email));
        }
        if let Some(is_first_login) = patch.is_first_login {
            am.is_first_login = Set(is_first_login);
        }
        let model = am.update(&self.db).await.context("update user")?;
        Ok(Some(user_from_model(model)?))
    }

    async fn customers_by_manager(&self, manager_id: i32) -> Result<Vec<User>, ChitServiceError> {
        let models = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Customer.as_str()))
            .filter(users::Column::ManagerId.eq(manager_id))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list customers by manager")?;
        models.into_iter().map(user_from_model).collect()
    }
}

// ── Chit group store ─────────────────────────────────────────────────────────

impl ChitGroupStore for DbStore {
    async fn create_chit_group(&self, group: NewChitGroup) -> Result<ChitGroup, ChitServiceError> {
        let model = chit_groups::ActiveModel {
            name: Set(group.name),
            value: Set(group.value),
            duration_months: Set(group.duration_months),
            members_count: Set(group.members_count),
            start_date: Set(group.start_date),
            is_active: Set(group.is_active),
            created_by: Set(group.created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create chit group")?;
        Ok(group_from_model(model))
    }

    async fn chit_group(&self, id: i32) -> Result<Option<ChitGroup>, ChitServiceError> {
        let model = chit_groups::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find chit group by id")?;
        Ok(model.map(group_from_model))
    }

    async fn chit_groups_by_creator(
        &self,
        manager_id: i32,
    ) -> Result<Vec<ChitGroup>, ChitServiceError> {
        let models = chit_groups::Entity::find()
            .filter(chit_groups::Column::CreatedBy.eq(manager_id))
            .order_by_asc(chit_groups::Column::Id)
            .all(&self.db)
            .await
            .context("list chit groups by creator")?;
        Ok(models.into_iter().map(group_from_model).collect())
    }

    async fn chit_groups_for_member(
        &self,
        user_id: i32,
    ) -> Result<Vec<ChitGroup>, ChitServiceError> {
        let group_ids: Vec<i32> = chit_group_members::Entity::find()
            .filter(chit_group_members::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .context("list memberships for user")?
            .into_iter()
            .map(|m| m.chit_group_id)
            .collect();
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = chit_groups::Entity::find()
            .filter(chit_groups::Column::Id.is_in(group_ids))
            .order_by_asc(chit_groups::Column::Id)
            .all(&self.db)
            .await
            .context("resolve member chit groups")?;
        Ok(models.into_iter().map(group_from_model).collect())
    }

    async fn update_chit_group(
        &self,
        id: i32,
        patch: ChitGroupPatch,
    ) -> Result<Option<ChitGroup>, ChitServiceError> {
        let Some(current) = self.chit_group(id).await? else {
            return Ok(None);
        };
        if patch.name.is_none()
            && patch.value.is_none()
            && patch.duration_months.is_none()
            && patch.members_count.is_none()
            && patch.start_date.is_none()
            && patch.is_active.is_none()
        {
            return Ok(Some(current));
        }
        let mut am = chit_groups::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = patch.name {
            am.name = Set(name);
        }
        if let Some(value) = patch.value {
            am.value = Set(value);
        }
        if let Some(duration_months) = patch.duration_months {
            am.duration_months = Set(duration_months);
        }
        if let Some(members_count) = patch.members_count {
            am.members_count = Set(members_count);
        }
        if let Some(start_date) = patch.start_date {
            am.start_date = Set(start_date);
        }
        if let Some(is_active) = patch.is_active {
            am.is_active = Set(is_active);
        }
        let model = am.update(&self.db).await.context("update chit group")?;
        Ok(Some(group_from_model(model)))
    }
}

// ── Member store ─────────────────────────────────────────────────────────────

impl MemberStore for DbStore {
    async fn add_member(
        &self,
        member: NewChitGroupMember,
    ) -> Result<Option<ChitGroupMember>, ChitServiceError> {
        let am = chit_group_members::ActiveModel {
            chit_group_id: Set(member.chit_group_id),
            user_id: Set(member.user_id),
            join_date: Set(member.join_date),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        match am.insert(&self.db).await {
            Ok(model) => Ok(Some(member_from_model(model))),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("add member").into()),
        }
    }

    async fn remove_member(
        &self,
        chit_group_id: i32,
        user_id: i32,
    ) -> Result<bool, ChitServiceError> {
        let res = chit_group_members::Entity::delete_many()
            .filter(chit_group_members::Column::ChitGroupId.eq(chit_group_id))
            .filter(chit_group_members::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("remove member")?;
        Ok(res.rows_affected > 0)
    }

    async fn members_of_group(
        &self,
        chit_group_id: i32,
    ) -> Result<Vec<ChitGroupMember>, ChitServiceError> {
        let models = chit_group_members::Entity::find()
            .filter(chit_group_members::Column::ChitGroupId.eq(chit_group_id))
            .order_by_asc(chit_group_members::Column::Id)
            .all(&self.db)
            .await
            .context("list members of group")?;
        Ok(models.into_iter().map(member_from_model).collect())
    }

    async fn membership(
        &self,
        chit_group_id: i32,
        user_id: i32,
    ) -> Result<Option<ChitGroupMember>, ChitServiceError> {
        let model = chit_group_members::Entity::find()
            .filter(chit_group_members::Column::ChitGroupId.eq(chit_group_id))
            .filter(chit_group_members::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find membership")?;
        Ok(model.map(member_from_model))
    }
}

// ── Auction store ────────────────────────────────────────────────────────────

impl AuctionStore for DbStore {
    async fn create_auction(&self, auction: NewAuction) -> Result<Auction, ChitServiceError> {
        let model = auctions::ActiveModel {
            chit_group_id: Set(auction.chit_group_id),
            auction_date: Set(auction.auction_date),
            month_number: Set(auction.month_number),
            status: Set(AuctionStatus::Scheduled.as_str().to_owned()),
            winner_user_id: Set(None),
            winning_bid: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create auction")?;
        auction_from_model(model)
    }

    async fn auction(&self, id: i32) -> Result<Option<Auction>, ChitServiceError> {
        let model = auctions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find auction by id")?;
        model.map(auction_from_model).transpose()
    }

    async fn auctions_by_group(
        &self,
        chit_group_id: i32,
    ) -> Result<Vec<Auction>, ChitServiceError> {
        let models = auctions::Entity::find()
            .filter(auctions::Column::ChitGroupId.eq(chit_group_id))
            .order_by_asc(auctions::Column::Id)
            .all(&self.db)
            .await
            .context("list auctions by group")?;
        models.into_iter().map(auction_from_model).collect()
    }

    async fn update_auction(
        &self,
        id: i32,
        patch: AuctionPatch,
    ) -> Result<Option<Auction>, ChitServiceError> {
        let Some(current) = self.auction(id).await? else {
            return Ok(None);
        };
        if patch.auction_date.is_none()
            && patch.month_number.is_none()
            && patch.status.is_none()
            && patch.winner_user_id.is_none()
            && patch.winning_bid.is_none()
        {
            return Ok(Some(current));
        }
        let mut am = auctions::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(auction_date) = patch.auction_date {
            am.auction_date = Set(auction_date);
        }
        if let Some(month_number) = patch.month_number {
            am.month_number = Set(month_number);
        }
        if let Some(status) = patch.status {
            am.status = Set(status.as_str().to_owned());
        }
        if let Some(winner_user_id) = patch.winner_user_id {
            am.winner_user_id = Set(Some(winner_user_id));
        }
        if let Some(winning_bid) = patch.winning_bid {
            am.winning_bid = Set(Some(winning_bid));
        }
        let model = am.update(&self.db).await.context("update auction")?;
        Ok(Some(auction_from_model(model)?))
    }
}

// ── Bid store ────────────────────────────────────────────────────────────────

impl BidStore for DbStore {
    async fn create_bid(&self, bid: NewBid) -> Result<Bid, ChitServiceError> {
        let model = bids::ActiveModel {
            auction_id: Set(bid.auction_id),
            user_id: Set(bid.user_id),
            bid_amount: Set(bid.bid_amount),
            bid_time: Set(bid.bid_time),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create bid")?;
        Ok(bid_from_model(model))
    }

    async fn bids_by_auction(&self, auction_id: i32) -> Result<Vec<Bid>, ChitServiceError> {
        let models = bids::Entity::find()
            .filter(bids::Column::AuctionId.eq(auction_id))
            .order_by_asc(bids::Column::Id)
            .all(&self.db)
            .await
            .context("list bids by auction")?;
        Ok(models.into_iter().map(bid_from_model).collect())
    }
}

// ── Payment store ────────────────────────────────────────────────────────────

impl PaymentStore for DbStore {
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment, ChitServiceError> {
        let model = payments::ActiveModel {
            chit_group_id: Set(payment.chit_group_id),
            user_id: Set(payment.user_id),
            amount: Set(payment.amount),
            payment_date: Set(payment.payment_date),
            month_number: Set(payment.month_number),
            status: Set(payment.status.as_str().to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create payment")?;
        payment_from_model(model)
    }

    async fn payment(&self, id: i32) -> Result<Option<Payment>, ChitServiceError> {
        let model = payments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find payment by id")?;
        model.map(payment_from_model).transpose()
    }

    async fn payments_by_group(
        &self,
        chit_group_id: i32,
    ) -> Result<Vec<Payment>, ChitServiceError> {
        let models = payments::Entity::find()
            .filter(payments::Column::ChitGroupId.eq(chit_group_id))
            .order_by_asc(payments::Column::Id)
            .all(&self.db)
            .await
            .context("list payments by group")?;
        models.into_iter().map(payment_from_model).collect()
    }

    async fn payments_by_user(&self, user_id: i32) -> Result<Vec<Payment>, ChitServiceError> {
        let models = payments::Entity::find()
            .filter(payments::Column::UserId.eq(user_id))
            .order_by_asc(payments::Column::Id)
            .all(&self.db)
            .await
            .context("list payments by user")?;
        models.into_iter().map(payment_from_model).collect()
    }

    async fn update_payment(
        &self,
        id: i32,
        patch: PaymentPatch,
    ) -> Result<Option<Payment>, ChitServiceError> {
        let Some(current) = self.payment(id).await? else {
            return Ok(None);
        };
        if patch.amount.is_none()
            && patch.payment_date.is_none()
            && patch.month_number.is_none()
            && patch.status.is_none()
        {
            return Ok(Some(current));
        }
        let mut am = payments::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(amount) = patch.amount {
            am.amount = Set(amount);
        }
        if let Some(payment_date) = patch.payment_date {
            am.payment_date = Set(payment_date);
        }
        if let Some(month_number) = patch.month_number {
            am.month_number = Set(month_number);
        }
        if let Some(status) = patch.status {
            am.status = Set(status.as_str().to_owned());
        }
        let model = am.update(&self.db).await.context("update payment")?;
        Ok(Some(payment_from_model(model)?))
    }
}

// ── Notification store ───────────────────────────────────────────────────────

impl NotificationStore for DbStore {
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, ChitServiceError> {
        let model = notifications::ActiveModel {
            user_id: Set(notification.user_id),
            message: Set(notification.message),
            is_read: Set(false),
            kind: Set(notification.kind.as_str().to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create notification")?;
        notification_from_model(model)
    }

    async fn notification(&self, id: i32) -> Result<Option<Notification>, ChitServiceError> {
        let model = notifications::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find notification by id")?;
        model.map(notification_from_model).transpose()
    }

    async fn notifications_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<Notification>, ChitServiceError> {
        let models = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .order_by_desc(notifications::Column::CreatedAt)
            .order_by_desc(notifications::Column::Id)
            .all(&self.db)
            .await
            .context("list notifications for user")?;
        models.into_iter().map(notification_from_model).collect()
    }

    async fn mark_notification_read(
        &self,
        id: i32,
    ) -> Result<Option<Notification>, ChitServiceError> {
        if self.notification(id).await?.is_none() {
            return Ok(None);
        }
        let am = notifications::ActiveModel {
            id: Set(id),
            is_read: Set(true),
            ..Default::default()
        };
        let model = am
            .update(&self.db)
            .await
            .context("mark notification read")?;
        Ok(Some(notification_from_model(model)?))
    }
}
