//! CloseConversationHandler - settles a conversation as won or lost.

use std::sync::Arc;

use tracing::info;

use crate::domain::billing::UsageKind;
use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, Money, TransactionId, UserId,
};
use crate::domain::payments::{Transaction, TransactionType};
use crate::ports::{ConversationRepository, SubscriptionRepository, TransactionRepository};

/// How the conversation ended.
#[derive(Debug, Clone)]
pub enum ConversationOutcome {
    /// Deal closed; a pending transaction is opened for the value.
    Won { value: Money },
    /// Customer walked away.
    Lost,
}

#[derive(Debug, Clone)]
pub struct CloseConversationCommand {
    pub conversation_id: ConversationId,
    pub outcome: ConversationOutcome,
}

#[derive(Debug, Clone)]
pub struct CloseConversationResult {
    /// Pending payment transaction for won deals.
    pub transaction_id: Option<TransactionId>,
}

/// Completes or abandons the conversation and, for won deals, opens the
/// payment transaction and meters a conversation against the subscription.
pub struct CloseConversationHandler {
    conversations: Arc<dyn ConversationRepository>,
    transactions: Arc<dyn TransactionRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    checkout_expiry_minutes: i64,
}

impl CloseConversationHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        transactions: Arc<dyn TransactionRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        checkout_expiry_minutes: i64,
    ) -> Self {
        Self {
            conversations,
            transactions,
            subscriptions,
            checkout_expiry_minutes,
        }
    }

    pub async fn handle(
        &self,
        cmd: CloseConversationCommand,
    ) -> Result<CloseConversationResult, DomainError> {
        let mut conversation = self
            .conversations
            .find_by_id(&cmd.conversation_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::ConversationNotFound, cmd.conversation_id)
            })?;

        let transaction_id = match cmd.outcome {
            ConversationOutcome::Won { value } => {
                conversation.complete(Some(value));

                // Channel customers are not always registered users; fall
                // back to a conversation-scoped guest reference.
                let payer = match conversation.customer_id.clone() {
                    Some(customer) => UserId::new(customer)?,
                    None => UserId::new(format!("guest-{}", conversation.id))?,
                };
                let mut transaction = Transaction::new(
                    conversation.merchant_id,
                    payer,
                    TransactionType::OneTime,
                    value,
                );
                transaction.conversation_id = Some(conversation.id);
                transaction.currency = conversation.currency.clone();
                transaction.set_expiration(self.checkout_expiry_minutes);
                self.transactions.save(&transaction).await?;

                info!(
                    conversation_id = %conversation.id,
                    transaction_id = %transaction.id,
                    value = %value,
                    "conversation won"
                );
                Some(transaction.id)
            }
            ConversationOutcome::Lost => {
                conversation.abandon();
                info!(conversation_id = %conversation.id, "conversation lost");
                None
            }
        };

        self.conversations.update(&conversation).await?;

        if let Some(mut subscription) = self
            .subscriptions
            .find_by_merchant(&conversation.merchant_id)
            .await?
        {
            subscription.record_usage(UsageKind::Conversations, 1);
            self.subscriptions.update(&subscription).await?;
        }

        Ok(CloseConversationResult { transaction_id })
    }
}
