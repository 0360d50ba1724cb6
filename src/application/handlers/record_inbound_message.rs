//! RecordInboundMessageHandler - appends a channel message and refreshes
//! conversation qualification.

use std::sync::Arc;

use tracing::info;

use crate::domain::billing::UsageKind;
use crate::domain::conversation::QualificationUpdate;
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, MessageId, Money};
use crate::domain::messaging::{
    MessageDirection, MessageLedger, MessageType, NewMessage, SenderType,
};
use crate::ports::{ConversationRepository, LedgerRepository, SubscriptionRepository};

/// Command carrying one message delivered by a channel adapter.
#[derive(Debug, Clone)]
pub struct RecordInboundMessageCommand {
    pub conversation_id: ConversationId,
    pub content: String,
    pub message_type: MessageType,
    pub direction: MessageDirection,
    pub sender_type: SenderType,
    /// Channel-side message id, if the channel reported one.
    pub external_id: Option<String>,
    /// Refreshed lead score from the AI pipeline, when available.
    pub qualification_score: Option<u8>,
    pub qualification: QualificationUpdate,
}

#[derive(Debug, Clone)]
pub struct RecordInboundMessageResult {
    pub message_id: MessageId,
    /// Estimate after any qualification refresh.
    pub estimated_value: Money,
}

/// Appends the message to the conversation's ledger, updates traffic
/// counters and qualification, and meters usage against the merchant's
/// subscription.
pub struct RecordInboundMessageHandler {
    conversations: Arc<dyn ConversationRepository>,
    ledgers: Arc<dyn LedgerRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    default_max_retries: u32,
}

impl RecordInboundMessageHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        ledgers: Arc<dyn LedgerRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        default_max_retries: u32,
    ) -> Self {
        Self {
            conversations,
            ledgers,
            subscriptions,
            default_max_retries,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordInboundMessageCommand,
    ) -> Result<RecordInboundMessageResult, DomainError> {
        let mut conversation = self
            .conversations
            .find_by_id(&cmd.conversation_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::ConversationNotFound, cmd.conversation_id)
            })?;

        // First message for a conversation creates its ledger.
        let mut ledger = match self.ledgers.find_by_conversation(&cmd.conversation_id).await? {
            Some(ledger) => ledger,
            None => {
                let ledger = MessageLedger::with_default_max_retries(
                    cmd.conversation_id,
                    self.default_max_retries,
                );
                self.ledgers.save(&ledger).await?;
                ledger
            }
        };

        let message_id = ledger.append(NewMessage {
            content: cmd.content,
            message_type: cmd.message_type,
            direction: cmd.direction,
            sender_type: cmd.sender_type,
            external_id: cmd.external_id,
            ai_metadata: None,
            max_retries: None,
        })?;

        conversation.record_message(cmd.sender_type);
        if let Some(score) = cmd.qualification_score {
            conversation.update_qualification(score, cmd.qualification);
        }

        self.ledgers.update(&ledger).await?;
        self.conversations.update(&conversation).await?;

        if let Some(mut subscription) = self
            .subscriptions
            .find_by_merchant(&conversation.merchant_id)
            .await?
        {
            subscription.record_usage(UsageKind::Messages, 1);
            self.subscriptions.update(&subscription).await?;
        }

        info!(
            conversation_id = %conversation.id,
            message_id = %message_id,
            estimated_value = %conversation.estimated_value,
            "recorded message"
        );

        Ok(RecordInboundMessageResult {
            message_id,
            estimated_value: conversation.estimated_value,
        })
    }
}
