//! Lifecycle status enums for auctions, payments, and notifications.
//!
//! All three are stored as snake_case strings in the durable backend and carried
//! as typed enums everywhere above the storage layer.

use serde::{Deserialize, Serialize};

/// Auction lifecycle status.
///
/// `Scheduled` is the only initial state. `Completed` and `Cancelled` are
/// terminal: no transition out of either is ever permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AuctionStatus {
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal states accept no further updates.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Payment status. Manually set only; there is no automatic
/// pending → overdue transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "paid" => Some(Self::Paid),
            "pending" => Some(Self::Pending),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }
}

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Payment,
    Auction,
    General,
}

impl NotificationKind {
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "payment" => Some(Self::Payment),
            "auction" => Some(Self::Auction),
            "general" => Some(Self::General),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Auction => "auction",
            Self::General => "general",
        }
    }
}
