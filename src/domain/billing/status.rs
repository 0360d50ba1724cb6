use serde::{Deserialize, Serialize};

/// Provider-mirrored subscription status.
///
/// Status writes follow the payment provider; no transition table is
/// enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Trialing,
    PastDue,
    Cancelled,
    Expired,
    Unpaid,
    Incomplete,
}

impl SubscriptionStatus {
    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    pub fn is_trialing(self) -> bool {
        self == Self::Trialing
    }

    /// True when the subscription still grants service access.
    pub fn grants_access(self) -> bool {
        matches!(self, Self::Active | Self::Trialing | Self::PastDue)
    }

    /// True when the subscription will not bill again.
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Cancelled | Self::Expired)
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Trialing => "trialing",
            Self::PastDue => "past_due",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
            Self::Unpaid => "unpaid",
            Self::Incomplete => "incomplete",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_follows_billing_grace() {
        assert!(SubscriptionStatus::Active.grants_access());
        assert!(SubscriptionStatus::PastDue.grants_access());
        assert!(!SubscriptionStatus::Cancelled.grants_access());
        assert!(!SubscriptionStatus::Unpaid.grants_access());
    }

    #[test]
    fn closed_states() {
        assert!(SubscriptionStatus::Expired.is_closed());
        assert!(!SubscriptionStatus::PastDue.is_closed());
    }
}
