//! Conversation repository port.

use async_trait::async_trait;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ConversationId, DomainError, MerchantId};

/// Persistence contract for Conversation aggregates.
///
/// Each aggregate instance is owned exclusively by the caller that loaded
/// it; implementations serialize concurrent writes to the same
/// conversation.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Save a new conversation.
    async fn save(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Update an existing conversation.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Find a conversation by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError>;

    /// All conversations belonging to a merchant.
    async fn find_by_merchant(
        &self,
        merchant_id: &MerchantId,
    ) -> Result<Vec<Conversation>, DomainError>;

    /// Delete a conversation and, via [`super::LedgerRepository`], its
    /// message ledger.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    async fn delete(&self, id: &ConversationId) -> Result<(), DomainError>;
}
