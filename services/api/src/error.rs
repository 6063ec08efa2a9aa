use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// One offending field in a validation failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Chitfund service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ChitServiceError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("chit group not found")]
    GroupNotFound,
    #[error("membership not found")]
    MemberNotFound,
    #[error("auction not found")]
    AuctionNotFound,
    #[error("payment not found")]
    PaymentNotFound,
    #[error("notification not found")]
    NotificationNotFound,
    #[error("username is already taken, pick a different one")]
    UsernameTaken,
    #[error("user is already a member of this chit group")]
    DuplicateMember,
    #[error("auction is not open for bidding")]
    AuctionClosed,
    #[error("auction status cannot change once completed or cancelled")]
    InvalidTransition,
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ChitServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::GroupNotFound => "GROUP_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::AuctionNotFound => "AUCTION_NOT_FOUND",
            Self::PaymentNotFound => "PAYMENT_NOT_FOUND",
            Self::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::DuplicateMember => "DUPLICATE_MEMBER",
            Self::AuctionClosed => "AUCTION_CLOSED",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::Validation(_) => "VALIDATION",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ChitServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::GroupNotFound
            | Self::MemberNotFound
            | Self::AuctionNotFound
            | Self::PaymentNotFound
            | Self::NotificationNotFound => StatusCode::NOT_FOUND,
            Self::UsernameTaken
            | Self::DuplicateMember
            | Self::AuctionClosed
            | Self::InvalidTransition => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation(ref fields) = self {
            body["fields"] = serde_json::json!(fields);
        }
        (status, axum::Json(body)).into_response()
    }
}
