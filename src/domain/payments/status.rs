use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Transaction status mirrored from the payment provider.
///
/// The transition table is advisory. Provider events may arrive out of
/// order, so the aggregate applies every write and logs those that fall
/// outside the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    Refunded,
    PartiallyRefunded,
    Disputed,
}

impl TransactionStatus {
    /// True for both full and partial refunds.
    pub fn is_refunded(self) -> bool {
        matches!(self, Self::Refunded | Self::PartiallyRefunded)
    }
}

impl StateMachine for TransactionStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Pending => vec![
                Self::Processing,
                Self::Completed,
                Self::Failed,
                Self::Cancelled,
                Self::Disputed,
            ],
            Self::Processing => vec![
                Self::Completed,
                Self::Failed,
                Self::Cancelled,
                Self::Disputed,
            ],
            Self::Completed => vec![
                Self::Refunded,
                Self::PartiallyRefunded,
                Self::Disputed,
            ],
            Self::PartiallyRefunded => vec![
                Self::Refunded,
                Self::PartiallyRefunded,
                Self::Disputed,
            ],
            Self::Failed | Self::Cancelled | Self::Refunded => vec![Self::Disputed],
            Self::Disputed => vec![],
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Refunded | Self::Disputed)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
            Self::PartiallyRefunded => "partially_refunded",
            Self::Disputed => "disputed",
        };
        f.write_str(s)
    }
}
