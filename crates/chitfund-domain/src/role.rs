//! User role types.

use serde::{Deserialize, Serialize};

/// Account role.
///
/// Wire format: snake_case string (`"manager"` / `"customer"`), which is also the
/// stored column value in the durable backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Manager,
    Customer,
}

impl UserRole {
    /// Convert from the stored string value. Returns `None` for unknown values.
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "manager" => Some(Self::Manager),
            "customer" => Some(Self::Customer),
            _ => None,
        }
    }

    /// Convert to the stored string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Customer => "customer",
        }
    }

    pub fn is_manager(self) -> bool {
        matches!(self, Self::Manager)
    }

    pub fn is_customer(self) -> bool {
        matches!(self, Self::Customer)
    }
}
