use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::foundation::{
    ConversationId, DomainError, MerchantId, Money, StateMachine, Timestamp, TransactionId, UserId,
    ValidationError,
};

use super::{
    LineItem, PaymentDetails, PaymentMethod, ProviderWebhook, TransactionStatus, TransactionType,
    WebhookAction,
};

/// Order fulfillment progress for physical goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Fulfillment {
    pub status: FulfillmentStatus,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub actual_delivery: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Audit entry for one refund against a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundRecord {
    pub amount: Money,
    pub reason: Option<String>,
    pub refunded_at: Timestamp,
}

/// A payment transaction mirroring the provider-side lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub merchant_id: MerchantId,
    pub user_id: UserId,
    pub conversation_id: Option<ConversationId>,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub payment_method: PaymentMethod,

    /// Net of tax. Overwritten by totals recalculation once line items
    /// exist.
    pub amount: Money,
    pub tax_amount: Money,
    pub fee_amount: Money,
    pub total_amount: Money,
    pub currency: String,
    pub refunded_amount: Money,

    pub description: Option<String>,
    pub line_items: Vec<LineItem>,
    pub refunds: Vec<RefundRecord>,

    /// Provider-side transaction id, unique across the store.
    pub provider_reference: Option<String>,
    pub payment_details: Option<PaymentDetails>,
    pub fulfillment: Option<Fulfillment>,

    pub invoice_number: Option<String>,
    pub checkout_url: Option<String>,

    pub failure_reason: Option<String>,
    pub failure_code: Option<String>,
    pub error_details: Option<String>,

    pub processed_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub failed_at: Option<Timestamp>,
    pub refunded_at: Option<Timestamp>,
    /// Checkout-link deadline.
    pub expires_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Transaction {
    pub fn new(
        merchant_id: MerchantId,
        user_id: UserId,
        transaction_type: TransactionType,
        amount: Money,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: TransactionId::new(),
            merchant_id,
            user_id,
            conversation_id: None,
            transaction_type,
            status: TransactionStatus::Pending,
            payment_method: PaymentMethod::CreditCard,
            amount,
            tax_amount: Money::ZERO,
            fee_amount: Money::ZERO,
            total_amount: amount,
            currency: "TRY".to_string(),
            refunded_amount: Money::ZERO,
            description: None,
            line_items: Vec::new(),
            refunds: Vec::new(),
            provider_reference: None,
            payment_details: None,
            fulfillment: None,
            invoice_number: None,
            checkout_url: None,
            failure_reason: None,
            failure_code: None,
            error_details: None,
            processed_at: None,
            completed_at: None,
            failed_at: None,
            refunded_at: None,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.status == TransactionStatus::Failed
    }

    /// Total minus provider fees.
    pub fn net_amount(&self) -> Money {
        self.total_amount - self.fee_amount
    }

    /// True for checkout links whose deadline has passed.
    pub fn is_expired(&self) -> bool {
        match &self.expires_at {
            Some(deadline) => Timestamp::now().is_after(deadline),
            None => false,
        }
    }

    pub fn can_be_refunded(&self) -> bool {
        self.is_completed() && !self.status.is_refunded()
    }

    pub fn max_refund_amount(&self) -> Money {
        self.total_amount.saturating_sub(self.refunded_amount)
    }

    pub fn mark_as_processing(&mut self) {
        self.apply_status(TransactionStatus::Processing);
        self.touch();
    }

    pub fn mark_as_completed(&mut self) {
        self.apply_status(TransactionStatus::Completed);
        let now = Timestamp::now();
        self.completed_at = Some(now);
        self.processed_at = Some(now);
        self.touch();
    }

    pub fn mark_as_failed(
        &mut self,
        reason: impl Into<String>,
        code: Option<String>,
        details: Option<String>,
    ) {
        self.apply_status(TransactionStatus::Failed);
        self.failed_at = Some(Timestamp::now());
        self.failure_reason = Some(reason.into());
        self.failure_code = code;
        self.error_details = details;
        self.touch();
    }

    pub fn cancel(&mut self, reason: Option<String>) {
        self.apply_status(TransactionStatus::Cancelled);
        self.failure_reason = reason;
        self.touch();
    }

    /// Accumulates a refund against the total.
    ///
    /// The status becomes `refunded` once the accumulated amount covers the
    /// total, `partially_refunded` otherwise. Each call appends an audit
    /// record.
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts and amounts above
    /// [`max_refund_amount`](Self::max_refund_amount).
    pub fn refund(
        &mut self,
        amount: Money,
        reason: Option<String>,
    ) -> Result<(), DomainError> {
        let max = self.max_refund_amount();
        if !amount.is_positive() || amount > max {
            return Err(ValidationError::out_of_range(
                "refund_amount",
                1,
                max.minor(),
                amount.minor(),
            )
            .into());
        }

        self.refunded_amount += amount;
        let target = if self.refunded_amount >= self.total_amount {
            TransactionStatus::Refunded
        } else {
            TransactionStatus::PartiallyRefunded
        };
        self.apply_status(target);

        let now = Timestamp::now();
        self.refunded_at = Some(now);
        self.refunds.push(RefundRecord {
            amount,
            reason,
            refunded_at: now,
        });
        self.touch();
        Ok(())
    }

    /// Reconciles provider state from a webhook payload.
    ///
    /// Safe under redelivery: a repeated terminal status refreshes
    /// timestamps without duplicating side effects, and refund
    /// notifications are clamped to what is still refundable. Returns the
    /// action taken so callers can log unhandled provider statuses.
    pub fn update_from_webhook(&mut self, payload: &ProviderWebhook) -> WebhookAction {
        let action = payload.action();
        match &action {
            WebhookAction::Complete => {
                if !self.is_completed() {
                    self.mark_as_completed();
                }
            }
            WebhookAction::Fail => {
                self.mark_as_failed(
                    payload
                        .failure_reason
                        .clone()
                        .unwrap_or_else(|| "Payment failed".to_string()),
                    payload.error_code.clone(),
                    payload.error_message.clone(),
                );
            }
            WebhookAction::Cancel => {
                self.cancel(Some("Cancelled by user".to_string()));
            }
            WebhookAction::Refund => {
                let requested = payload.refunded_amount.unwrap_or(self.total_amount);
                let amount = requested.min(self.max_refund_amount());
                if amount.is_positive() {
                    // Within bounds after clamping, cannot fail.
                    let _ = self.refund(amount, payload.refund_reason.clone());
                }
            }
            WebhookAction::Unhandled(status) => {
                warn!(
                    transaction_id = %self.id,
                    provider_status = status.as_str(),
                    "unhandled provider status in webhook"
                );
            }
            WebhookAction::Ignored => {}
        }

        if let Some(details) = &payload.payment_details {
            match &mut self.payment_details {
                Some(existing) => existing.merge(details.clone()),
                None => self.payment_details = Some(details.clone()),
            }
        }
        self.touch();
        action
    }

    /// Appends a line item and rederives all amounts from the item list.
    pub fn add_line_item(&mut self, item: LineItem) {
        self.line_items.push(item);
        self.recalculate_totals();
        self.touch();
    }

    fn recalculate_totals(&mut self) {
        if self.line_items.is_empty() {
            return;
        }
        let subtotal: Money = self.line_items.iter().map(LineItem::total_price).sum();
        let total_tax: Money = self.line_items.iter().map(|item| item.tax).sum();
        self.amount = subtotal - total_tax;
        self.tax_amount = total_tax;
        self.total_amount = subtotal;
    }

    pub fn set_checkout_url(&mut self, url: impl Into<String>) {
        self.checkout_url = Some(url.into());
        self.touch();
    }

    /// Sets the checkout-link deadline `minutes` from now.
    pub fn set_expiration(&mut self, minutes: i64) {
        self.expires_at = Some(Timestamp::now().add_minutes(minutes));
        self.touch();
    }

    /// Assigns an invoice number of the form `INV-YYYYMM-NNNN`.
    ///
    /// The sequence part is derived from the transaction id, so repeated
    /// calls are stable for the same transaction.
    pub fn generate_invoice_number(&mut self) -> String {
        let now = Timestamp::now();
        let sequence = u32::from_le_bytes(
            self.id.as_uuid().as_bytes()[..4]
                .try_into()
                .unwrap_or([0; 4]),
        ) % 10_000;
        let number = format!(
            "INV-{}{:02}-{:04}",
            now.as_datetime().year(),
            now.as_datetime().month(),
            sequence
        );
        self.invoice_number = Some(number.clone());
        self.touch();
        number
    }

    pub fn set_fulfillment_status(&mut self, status: FulfillmentStatus, notes: Option<String>) {
        let fulfillment = self.fulfillment.get_or_insert_with(Fulfillment::default);
        fulfillment.status = status;
        if notes.is_some() {
            fulfillment.notes = notes;
        }
        if status == FulfillmentStatus::Delivered {
            fulfillment.actual_delivery = Some(Timestamp::now());
        }
        self.touch();
    }

    // Single funnel for all status writes. Provider events arrive out of
    // order, so writes outside the advisory table are applied and logged
    // rather than rejected.
    fn apply_status(&mut self, target: TransactionStatus) {
        if target != self.status && !self.status.can_transition_to(&target) {
            warn!(
                transaction_id = %self.id,
                from = %self.status,
                to = %target,
                "transaction status write outside advisory transition table"
            );
        }
        self.status = target;
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
