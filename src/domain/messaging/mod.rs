//! Messaging domain module.
//!
//! Per-conversation ordered message log with a delivery-status state
//! machine and a bounded retry policy.
//!
//! # Module Structure
//!
//! - `types` - Message type, direction, and sender enums
//! - `status` - MessageStatus state machine
//! - `delivery` - Delivery timestamps and retry bookkeeping
//! - `message` - Message entity
//! - `ledger` - MessageLedger, the ordered per-conversation log

mod delivery;
mod ledger;
mod message;
mod status;
mod types;

pub use delivery::{DeliveryInfo, DEFAULT_MAX_RETRIES};
pub use ledger::MessageLedger;
pub use message::{AiMetadata, Message, NewMessage, Sentiment, SentimentLabel, DELETED_PLACEHOLDER};
pub use status::MessageStatus;
pub use types::{MessageDirection, MessageType, SenderType};
