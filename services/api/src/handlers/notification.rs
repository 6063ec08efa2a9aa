use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

use chitfund_domain::pagination::PageRequest;
use chitfund_domain::status::NotificationKind;

use crate::domain::types::{ActorContext, Notification};
use crate::error::ChitServiceError;
use crate::state::AppState;
use crate::usecase::notification::{ListNotificationsUseCase, MarkNotificationReadUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct NotificationResponse {
    pub id: i32,
    pub user_id: i32,
    pub message: String,
    pub is_read: bool,
    pub kind: NotificationKind,
    #[serde(serialize_with = "chitfund_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            message: n.message,
            is_read: n.is_read,
            kind: n.kind,
            created_at: n.created_at,
        }
    }
}

// ── GET /notifications ───────────────────────────────────────────────────────

pub async fn list_notifications(
    actor: ActorContext,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<NotificationResponse>>, ChitServiceError> {
    let uc = ListNotificationsUseCase {
        notifications: state.store(),
    };
    let notifications = uc.execute(&actor, page.clamped()).await?;
    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

// ── PATCH /notifications/{id}/read ───────────────────────────────────────────

pub async fn mark_notification_read(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NotificationResponse>, ChitServiceError> {
    let uc = MarkNotificationReadUseCase {
        notifications: state.store(),
    };
    let notification = uc.execute(&actor, id).await?;
    Ok(Json(notification.into()))
}
