//! Delivery bookkeeping for a message.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Default number of send attempts after the first failure.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delivery timestamps and retry bookkeeping for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInfo {
    /// When the message was handed to the channel.
    pub sent_at: Option<Timestamp>,

    /// When the channel confirmed delivery.
    pub delivered_at: Option<Timestamp>,

    /// When the channel confirmed the message was read.
    pub read_at: Option<Timestamp>,

    /// When the most recent send failure was recorded.
    pub failed_at: Option<Timestamp>,

    /// Reason reported for the most recent failure.
    pub failure_reason: Option<String>,

    /// Number of failed send attempts so far.
    pub retry_count: u32,

    /// Retry budget for this message.
    pub max_retries: u32,
}

impl DeliveryInfo {
    /// Creates empty delivery info with the given retry budget.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            sent_at: None,
            delivered_at: None,
            read_at: None,
            failed_at: None,
            failure_reason: None,
            retry_count: 0,
            max_retries,
        }
    }

    /// Records a send failure, incrementing the retry count.
    pub fn record_failure(&mut self, reason: impl Into<String>, at: Timestamp) {
        self.failed_at = Some(at);
        self.failure_reason = Some(reason.into());
        self.retry_count += 1;
    }

    /// True while the retry budget has not been spent.
    pub fn can_retry(&self) -> bool {
        self.retry_count < self.max_retries
    }
}

impl Default for DeliveryInfo {
    fn default() -> Self {
        Self::with_max_retries(DEFAULT_MAX_RETRIES)
    }
}
