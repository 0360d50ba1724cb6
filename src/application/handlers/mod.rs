//! Command handlers.

mod close_conversation;
mod delete_conversation;
mod process_payment_webhook;
mod record_inbound_message;

pub use close_conversation::{
    CloseConversationCommand, CloseConversationHandler, CloseConversationResult,
    ConversationOutcome,
};
pub use delete_conversation::{DeleteConversationCommand, DeleteConversationHandler};
pub use process_payment_webhook::{
    ProcessPaymentWebhookCommand, ProcessPaymentWebhookHandler, ProcessPaymentWebhookResult,
};
pub use record_inbound_message::{
    RecordInboundMessageCommand, RecordInboundMessageHandler, RecordInboundMessageResult,
};
