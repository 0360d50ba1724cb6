//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `conversation` - Conversation lifecycle, stages, and lead qualification
//! - `messaging` - Per-conversation message ledger and delivery tracking
//! - `billing` - Subscription plans, billing periods, and usage metering
//! - `payments` - Payment transactions, refunds, and webhook reconciliation

pub mod billing;
pub mod conversation;
pub mod foundation;
pub mod messaging;
pub mod payments;
