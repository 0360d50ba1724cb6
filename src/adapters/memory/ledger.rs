use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};
use crate::domain::messaging::MessageLedger;
use crate::ports::LedgerRepository;

/// In-memory message ledger store, keyed by conversation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerRepository {
    ledgers: Arc<RwLock<HashMap<ConversationId, MessageLedger>>>,
}

impl InMemoryLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    async fn save(&self, ledger: &MessageLedger) -> Result<(), DomainError> {
        let mut store = self.ledgers.write().await;
        store.insert(ledger.conversation_id, ledger.clone());
        Ok(())
    }

    async fn update(&self, ledger: &MessageLedger) -> Result<(), DomainError> {
        let mut store = self.ledgers.write().await;
        match store.get_mut(&ledger.conversation_id) {
            Some(existing) => {
                *existing = ledger.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::ConversationNotFound,
                ledger.conversation_id,
            )),
        }
    }

    async fn find_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<MessageLedger>, DomainError> {
        Ok(self.ledgers.read().await.get(conversation_id).cloned())
    }

    async fn delete_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<(), DomainError> {
        self.ledgers.write().await.remove(conversation_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::messaging::{MessageDirection, NewMessage, SenderType};

    #[tokio::test]
    async fn ledger_round_trip_keeps_messages() {
        let repo = InMemoryLedgerRepository::new();
        let mut ledger = MessageLedger::new(ConversationId::new());
        ledger
            .append(NewMessage::text(
                "hello",
                MessageDirection::Inbound,
                SenderType::Customer,
            ))
            .unwrap();
        repo.save(&ledger).await.unwrap();

        let loaded = repo
            .find_by_conversation(&ledger.conversation_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[tokio::test]
    async fn cascade_delete_is_silent_when_absent() {
        let repo = InMemoryLedgerRepository::new();
        repo.delete_by_conversation(&ConversationId::new())
            .await
            .unwrap();
    }
}
