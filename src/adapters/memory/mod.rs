//! In-memory repository adapters.
//!
//! Back the ports with `RwLock<HashMap>` stores. Used by tests and local
//! development; a relational adapter can replace these without touching
//! the application layer.

mod conversation;
mod ledger;
mod subscription;
mod transaction;

pub use conversation::InMemoryConversationRepository;
pub use ledger::InMemoryLedgerRepository;
pub use subscription::InMemorySubscriptionRepository;
pub use transaction::InMemoryTransactionRepository;
