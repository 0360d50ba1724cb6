//! Port traits for persistence.
//!
//! The engine mutates aggregates in memory; these ports define how
//! aggregates are loaded and stored. Implementations live in `adapters`.

mod conversation_repository;
mod ledger_repository;
mod subscription_repository;
mod transaction_repository;

pub use conversation_repository::ConversationRepository;
pub use ledger_repository::LedgerRepository;
pub use subscription_repository::SubscriptionRepository;
pub use transaction_repository::TransactionRepository;
