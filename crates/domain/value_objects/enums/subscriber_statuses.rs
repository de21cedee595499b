use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    #[default]
    Active,
    Expired,
    Cancelled,
    Pending,
}

impl Display for SubscriberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SubscriberStatus::Active => "active",
            SubscriberStatus::Expired => "expired",
            SubscriberStatus::Cancelled => "cancelled",
            SubscriberStatus::Pending => "pending",
        };
        write!(f, "{}", status)
    }
}

impl SubscriberStatus {
    /// Unknown values map to `Pending`.
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => SubscriberStatus::Active,
            "expired" => SubscriberStatus::Expired,
            "cancelled" | "canceled" => SubscriberStatus::Cancelled,
            _ => SubscriberStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_stored_values() {
        assert_eq!(SubscriberStatus::Active.to_string(), "active");
        assert_eq!(SubscriberStatus::Expired.to_string(), "expired");
        assert_eq!(SubscriberStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(SubscriberStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn from_str_is_lenient() {
        assert_eq!(SubscriberStatus::from_str(" Active "), SubscriberStatus::Active);
        assert_eq!(SubscriberStatus::from_str("canceled"), SubscriberStatus::Cancelled);
        assert_eq!(SubscriberStatus::from_str("bogus"), SubscriberStatus::Pending);
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&SubscriberStatus::Expired).unwrap();
        assert_eq!(json, "\"expired\"");
    }
}
