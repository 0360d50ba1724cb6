//! Payment transactions.
//!
//! Transactions mirror a provider-side payment lifecycle. Status writes are
//! lenient by contract, refunds accumulate against the total, and webhook
//! payloads reconcile provider state into the transaction.

mod aggregate;
mod line_item;
mod status;
mod types;
mod webhook;

pub use aggregate::{Fulfillment, FulfillmentStatus, RefundRecord, Transaction};
pub use line_item::LineItem;
pub use status::TransactionStatus;
pub use types::{PaymentMethod, TransactionType};
pub use webhook::{PaymentDetails, ProviderWebhook, WebhookAction};
