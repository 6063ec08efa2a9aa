use chrono::NaiveDate;

use chitfund_domain::role::UserRole;
use chitfund_domain::status::{NotificationKind, PaymentStatus};

use crate::domain::guard;
use crate::domain::repository::{
    ChitGroupStore, MemberStore, NotificationStore, PaymentStore, UserStore,
};
use crate::domain::types::{ActorContext, NewNotification, NewPayment, Payment, PaymentPatch};
use crate::domain::validate::{validate_amount, validate_month_number};
use crate::error::ChitServiceError;

// ── RecordPayment ────────────────────────────────────────────────────────────

pub struct RecordPaymentInput {
    pub chit_group_id: i32,
    pub user_id: i32,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub month_number: i32,
    pub status: PaymentStatus,
}

pub struct RecordPaymentUseCase<
    G: ChitGroupStore,
    M: MemberStore,
    U: UserStore,
    P: PaymentStore,
    N: NotificationStore,
> {
    pub groups: G,
    pub members: M,
    pub users: U,
    pub payments: P,
    pub notifications: N,
}

impl<G, M, U, P, N> RecordPaymentUseCase<G, M, U, P, N>
where
    G: ChitGroupStore,
    M: MemberStore,
    U: UserStore,
    P: PaymentStore,
    N: NotificationStore,
{
    /// Record a payment and notify the paying user.
    ///
    /// The payment is the authoritative record: a notification-write failure
    /// after the payment is stored is logged and swallowed, never rolled back
    /// or surfaced.
    pub async fn execute(
        &self,
        actor: &ActorContext,
        input: RecordPaymentInput,
    ) -> Result<Payment, ChitServiceError> {
        let group = self
            .groups
            .chit_group(input.chit_group_id)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)?;
        guard::require_group_owner(actor, &group)?;

        let user = self
            .users
            .user(input.user_id)
            .await?
            .ok_or(ChitServiceError::UserNotFound)?;
        if self
            .members
            .membership(group.id, user.id)
            .await?
            .is_none()
        {
            return Err(ChitServiceError::MemberNotFound);
        }

        validate_amount(input.amount, "amount")?;
        validate_month_number(input.month_number)?;

        let payment = self
            .payments
            .create_payment(NewPayment {
                chit_group_id: input.chit_group_id,
                user_id: input.user_id,
                amount: input.amount,
                payment_date: input.payment_date,
                month_number: input.month_number,
                status: input.status,
            })
            .await?;

        let message = format!(
            "Payment of {} for {} (month {}) recorded as {}",
            payment.amount,
            group.name,
            payment.month_number,
            payment.status.as_str(),
        );
        if let Err(e) = self
            .notifications
            .create_notification(NewNotification {
                user_id: payment.user_id,
                message,
                kind: NotificationKind::Payment,
            })
            .await
        {
            tracing::warn!(
                error = %e,
                payment_id = payment.id,
                user_id = payment.user_id,
                "notification write failed after payment; payment stands"
            );
        }

        Ok(payment)
    }
}

// ── ListPayments ─────────────────────────────────────────────────────────────

pub struct ListPaymentsUseCase<G: ChitGroupStore, M: MemberStore, P: PaymentStore> {
    pub groups: G,
    pub members: M,
    pub payments: P,
}

impl<G: ChitGroupStore, M: MemberStore, P: PaymentStore> ListPaymentsUseCase<G, M, P> {
    /// Managers see payments across their own groups (optionally narrowed to
    /// one of them); customers see their own payments only.
    pub async fn execute(
        &self,
        actor: &ActorContext,
        chit_group_id: Option<i32>,
    ) -> Result<Vec<Payment>, ChitServiceError> {
        match actor.role {
            UserRole::Manager => match chit_group_id {
                Some(gid) => {
                    let group = self
                        .groups
                        .chit_group(gid)
                        .await?
                        .ok_or(ChitServiceError::GroupNotFound)?;
                    guard::require_group_owner(actor, &group)?;
                    self.payments.payments_by_group(gid).await
                }
                None => {
                    let mut out = Vec::new();
                    for group in self.groups.chit_groups_by_creator(actor.user_id).await? {
                        out.extend(self.payments.payments_by_group(group.id).await?);
                    }
                    Ok(out)
                }
            },
            UserRole::Customer => {
                let mut payments = self.payments.payments_by_user(actor.user_id).await?;
                if let Some(gid) = chit_group_id {
                    let group = self
                        .groups
                        .chit_group(gid)
                        .await?
                        .ok_or(ChitServiceError::GroupNotFound)?;
                    let membership = self.members.membership(gid, actor.user_id).await?;
                    guard::require_group_access(actor, &group, membership.as_ref())?;
                    payments.retain(|p| p.chit_group_id == gid);
                }
                Ok(payments)
            }
        }
    }
}

// ── UpdatePayment (manual status change) ─────────────────────────────────────

pub struct UpdatePaymentUseCase<G: ChitGroupStore, P: PaymentStore> {
    pub groups: G,
    pub payments: P,
}

impl<G: ChitGroupStore, P: PaymentStore> UpdatePaymentUseCase<G, P> {
    pub async fn execute(
        &self,
        actor: &ActorContext,
        payment_id: i32,
        patch: PaymentPatch,
    ) -> Result<Payment, ChitServiceError> {
        let payment = self
            .payments
            .payment(payment_id)
            .await?
            .ok_or(ChitServiceError::PaymentNotFound)?;
        let group = self
            .groups
            .chit_group(payment.chit_group_id)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)?;
        guard::require_group_owner(actor, &group)?;

        if let Some(amount) = patch.amount {
            validate_amount(amount, "amount")?;
        }
        if let Some(month_number) = patch.month_number {
            validate_month_number(month_number)?;
        }

        self.payments
            .update_payment(payment_id, patch)
            .await?
            .ok_or(ChitServiceError::PaymentNotFound)
    }
}
