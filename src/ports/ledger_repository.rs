//! Message ledger repository port.

use async_trait::async_trait;

use crate::domain::foundation::{ConversationId, DomainError};
use crate::domain::messaging::MessageLedger;

/// Persistence contract for per-conversation message ledgers.
///
/// One ledger per conversation. The ledger is loaded and stored whole;
/// per-message updates go through the aggregate, not the repository.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Save a new ledger.
    async fn save(&self, ledger: &MessageLedger) -> Result<(), DomainError>;

    /// Update an existing ledger.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if no ledger exists for the conversation
    async fn update(&self, ledger: &MessageLedger) -> Result<(), DomainError>;

    /// Find the ledger for a conversation. Returns `None` if not found.
    async fn find_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<MessageLedger>, DomainError>;

    /// Delete the ledger for a conversation, used on cascade deletion of
    /// the owning conversation.
    async fn delete_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn LedgerRepository) {}
    }
}
