//! ProcessPaymentWebhookHandler - reconciles a provider notification into
//! a transaction.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, TransactionId};
use crate::domain::payments::{ProviderWebhook, TransactionStatus, WebhookAction};
use crate::ports::TransactionRepository;

/// Command carrying one provider webhook delivery.
#[derive(Debug, Clone)]
pub struct ProcessPaymentWebhookCommand {
    /// Provider-side transaction reference from the webhook envelope.
    pub provider_reference: String,
    pub payload: ProviderWebhook,
}

#[derive(Debug, Clone)]
pub struct ProcessPaymentWebhookResult {
    pub transaction_id: TransactionId,
    pub action: WebhookAction,
    pub status: TransactionStatus,
}

/// Looks the transaction up by provider reference and applies the webhook.
///
/// Redeliveries are safe: the aggregate treats repeated terminal statuses
/// as refreshes and clamps refund amounts to what is still refundable.
pub struct ProcessPaymentWebhookHandler {
    transactions: Arc<dyn TransactionRepository>,
}

impl ProcessPaymentWebhookHandler {
    pub fn new(transactions: Arc<dyn TransactionRepository>) -> Self {
        Self { transactions }
    }

    pub async fn handle(
        &self,
        cmd: ProcessPaymentWebhookCommand,
    ) -> Result<ProcessPaymentWebhookResult, DomainError> {
        let mut transaction = self
            .transactions
            .find_by_provider_reference(&cmd.provider_reference)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::TransactionNotFound, &cmd.provider_reference)
            })?;

        let action = transaction.update_from_webhook(&cmd.payload);
        self.transactions.update(&transaction).await?;

        info!(
            transaction_id = %transaction.id,
            provider_reference = cmd.provider_reference.as_str(),
            status = %transaction.status,
            "processed payment webhook"
        );

        Ok(ProcessPaymentWebhookResult {
            transaction_id: transaction.id,
            action,
            status: transaction.status,
        })
    }
}
