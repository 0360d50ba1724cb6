//! Message delivery status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Delivery status of a message.
///
/// Moves forward along `Pending -> Sent -> Delivered -> Read`. A send
/// failure from any non-terminal state lands in `Failed`, which can return
/// to `Pending` through a bounded retry. `Read` is terminal; `Failed`
/// becomes effectively terminal once retries are exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Accepted into the ledger, not yet handed to the channel.
    #[default]
    Pending,

    /// Handed to the channel adapter.
    Sent,

    /// Delivery receipt received from the channel.
    Delivered,

    /// Read receipt received from the channel.
    Read,

    /// Send failed; eligible for retry while attempts remain.
    Failed,
}

impl MessageStatus {
    /// Returns true once the channel has confirmed delivery or read.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Delivered | Self::Read)
    }
}

impl StateMachine for MessageStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MessageStatus::*;
        matches!(
            (self, target),
            (Pending, Sent)
                | (Sent, Delivered)
                | (Delivered, Read)
                // Send failures from any pre-read state
                | (Pending, Failed)
                | (Sent, Failed)
                | (Delivered, Failed)
                // Repeated failures keep incrementing the retry count
                | (Failed, Failed)
                // Bounded retry re-queues the message
                | (Failed, Pending)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MessageStatus::*;
        match self {
            Pending => vec![Sent, Failed],
            Sent => vec![Delivered, Failed],
            Delivered => vec![Read, Failed],
            Read => vec![],
            Failed => vec![Failed, Pending],
        }
    }
}
