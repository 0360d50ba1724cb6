//! DeleteConversationHandler - removes a conversation and its ledger.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{ConversationId, DomainError};
use crate::ports::{ConversationRepository, LedgerRepository};

#[derive(Debug, Clone)]
pub struct DeleteConversationCommand {
    pub conversation_id: ConversationId,
}

/// Deletes a conversation together with its message ledger. The
/// conversation owns its messages, so removal cascades; a conversation
/// that never received a message has no ledger and the cascade is a
/// no-op for it.
pub struct DeleteConversationHandler {
    conversations: Arc<dyn ConversationRepository>,
    ledgers: Arc<dyn LedgerRepository>,
}

impl DeleteConversationHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        ledgers: Arc<dyn LedgerRepository>,
    ) -> Self {
        Self {
            conversations,
            ledgers,
        }
    }

    pub async fn handle(&self, cmd: DeleteConversationCommand) -> Result<(), DomainError> {
        self.conversations.delete(&cmd.conversation_id).await?;
        self.ledgers
            .delete_by_conversation(&cmd.conversation_id)
            .await?;

        info!(conversation_id = %cmd.conversation_id, "deleted conversation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryConversationRepository, InMemoryLedgerRepository};
    use crate::domain::conversation::{Conversation, ConversationChannel};
    use crate::domain::foundation::{ErrorCode, MerchantId};
    use crate::domain::messaging::{MessageDirection, MessageLedger, NewMessage, SenderType};

    struct Fixture {
        conversations: Arc<InMemoryConversationRepository>,
        ledgers: Arc<InMemoryLedgerRepository>,
        handler: DeleteConversationHandler,
    }

    fn fixture() -> Fixture {
        let conversations = Arc::new(InMemoryConversationRepository::new());
        let ledgers = Arc::new(InMemoryLedgerRepository::new());
        let handler = DeleteConversationHandler::new(conversations.clone(), ledgers.clone());
        Fixture {
            conversations,
            ledgers,
            handler,
        }
    }

    #[tokio::test]
    async fn deleting_a_conversation_removes_its_ledger() {
        let fx = fixture();
        let convo = Conversation::new(MerchantId::new(), ConversationChannel::Whatsapp);
        fx.conversations.save(&convo).await.unwrap();

        let mut ledger = MessageLedger::new(convo.id);
        ledger
            .append(NewMessage::text(
                "hello",
                MessageDirection::Inbound,
                SenderType::Customer,
            ))
            .unwrap();
        fx.ledgers.save(&ledger).await.unwrap();

        fx.handler
            .handle(DeleteConversationCommand {
                conversation_id: convo.id,
            })
            .await
            .unwrap();

        assert!(fx.conversations.find_by_id(&convo.id).await.unwrap().is_none());
        assert!(fx
            .ledgers
            .find_by_conversation(&convo.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn deleting_a_conversation_without_messages_succeeds() {
        let fx = fixture();
        let convo = Conversation::new(MerchantId::new(), ConversationChannel::Webchat);
        fx.conversations.save(&convo).await.unwrap();

        fx.handler
            .handle(DeleteConversationCommand {
                conversation_id: convo.id,
            })
            .await
            .unwrap();

        assert!(fx.conversations.find_by_id(&convo.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_conversation_is_rejected() {
        let fx = fixture();
        let err = fx
            .handler
            .handle(DeleteConversationCommand {
                conversation_id: ConversationId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConversationNotFound);
    }
}
