use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, MerchantId};
use crate::ports::ConversationRepository;

/// In-memory conversation store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    conversations: Arc<RwLock<HashMap<ConversationId, Conversation>>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.conversations.read().await.len()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn save(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let mut store = self.conversations.write().await;
        store.insert(conversation.id, conversation.clone());
        Ok(())
    }

    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let mut store = self.conversations.write().await;
        match store.get_mut(&conversation.id) {
            Some(existing) => {
                *existing = conversation.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::ConversationNotFound,
                conversation.id,
            )),
        }
    }

    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError> {
        Ok(self.conversations.read().await.get(id).cloned())
    }

    async fn find_by_merchant(
        &self,
        merchant_id: &MerchantId,
    ) -> Result<Vec<Conversation>, DomainError> {
        Ok(self
            .conversations
            .read()
            .await
            .values()
            .filter(|c| c.merchant_id == *merchant_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), DomainError> {
        let mut store = self.conversations.write().await;
        store
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(ErrorCode::ConversationNotFound, id))
    }
}
