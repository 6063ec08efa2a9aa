use chitfund_domain::pagination::PageRequest;

use crate::domain::guard;
use crate::domain::repository::NotificationStore;
use crate::domain::types::{ActorContext, Notification};
use crate::error::ChitServiceError;

// ── ListNotifications ────────────────────────────────────────────────────────

pub struct ListNotificationsUseCase<N: NotificationStore> {
    pub notifications: N,
}

impl<N: NotificationStore> ListNotificationsUseCase<N> {
    /// The actor's own notifications, newest first.
    pub async fn execute(
        &self,
        actor: &ActorContext,
        page: PageRequest,
    ) -> Result<Vec<Notification>, ChitServiceError> {
        let all = self
            .notifications
            .notifications_for_user(actor.user_id)
            .await?;
        Ok(all
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect())
    }
}

// ── MarkNotificationRead ─────────────────────────────────────────────────────

pub struct MarkNotificationReadUseCase<N: NotificationStore> {
    pub notifications: N,
}

impl<N: NotificationStore> MarkNotificationReadUseCase<N> {
    pub async fn execute(
        &self,
        actor: &ActorContext,
        id: i32,
    ) -> Result<Notification, ChitServiceError> {
        let notification = self
            .notifications
            .notification(id)
            .await?
            .ok_or(ChitServiceError::NotificationNotFound)?;
        guard::require_self(actor, notification.user_id)?;
        self.notifications
            .mark_notification_read(id)
            .await?
            .ok_or(ChitServiceError::NotificationNotFound)
    }
}
