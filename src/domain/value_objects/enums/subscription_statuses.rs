use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Authoritative subscription state. `expires_at` is informational only:
/// nothing flips `Active` to `Expired` automatically, so readers must trust
/// the stored status.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Expired,
    Cancelled,
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", status)
    }
}

impl SubscriptionStatus {
    /// Unknown stored values fall back to `Expired`, not the `Active`
    /// default: a status we cannot recognize must never grant access.
    pub fn from_str(value: &str) -> Self {
        match value {
            "active" => SubscriptionStatus::Active,
            "cancelled" => SubscriptionStatus::Cancelled,
            _ => SubscriptionStatus::Expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_falls_back_to_expired() {
        assert_eq!(
            SubscriptionStatus::from_str("pending"),
            SubscriptionStatus::Expired
        );
        assert_eq!(SubscriptionStatus::from_str(""), SubscriptionStatus::Expired);
    }
}
