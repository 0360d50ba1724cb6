//! Provider webhook payload and status mapping.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Money;

/// Card and acquirer details reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_last4: Option<String>,
    pub card_brand: Option<String>,
    pub installments: Option<u32>,
    pub bin: Option<String>,
    pub issuer: Option<String>,
}

impl PaymentDetails {
    /// Merges present fields of `other` into self.
    pub fn merge(&mut self, other: PaymentDetails) {
        if other.card_last4.is_some() {
            self.card_last4 = other.card_last4;
        }
        if other.card_brand.is_some() {
            self.card_brand = other.card_brand;
        }
        if other.installments.is_some() {
            self.installments = other.installments;
        }
        if other.bin.is_some() {
            self.bin = other.bin;
        }
        if other.issuer.is_some() {
            self.issuer = other.issuer;
        }
    }
}

/// Asynchronous status notification from a payment provider.
///
/// Field names follow the provider wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderWebhook {
    pub status: Option<String>,
    /// Some providers report under this name instead of `status`.
    pub payment_status: Option<String>,
    pub refunded_amount: Option<Money>,
    pub refund_reason: Option<String>,
    pub failure_reason: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub payment_details: Option<PaymentDetails>,
}

/// What a webhook payload asks the transaction to do.
///
/// Unrecognized provider statuses map to [`WebhookAction::Unhandled`] so
/// callers can observe schema drift without the reconciliation failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookAction {
    Complete,
    Fail,
    Cancel,
    Refund,
    /// Provider sent a status this engine does not map; carries the raw
    /// string for logging.
    Unhandled(String),
    /// Payload carried no status at all.
    Ignored,
}

impl ProviderWebhook {
    /// Effective provider status, preferring `status` over `paymentStatus`.
    pub fn effective_status(&self) -> Option<&str> {
        self.status.as_deref().or(self.payment_status.as_deref())
    }

    /// Maps the provider status string, case-insensitively, to an action.
    pub fn action(&self) -> WebhookAction {
        let Some(status) = self.effective_status() else {
            return WebhookAction::Ignored;
        };
        match status.to_ascii_lowercase().as_str() {
            "success" | "completed" | "paid" => WebhookAction::Complete,
            "failure" | "failed" | "error" => WebhookAction::Fail,
            "cancelled" => WebhookAction::Cancel,
            "refunded" | "refund" => WebhookAction::Refund,
            other => WebhookAction::Unhandled(other.to_string()),
        }
    }
}
