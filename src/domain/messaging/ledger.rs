//! Ordered message log for a single conversation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, MessageId, UserId,
};

use super::{Message, MessageDirection, MessageStatus, NewMessage, DEFAULT_MAX_RETRIES};

/// Append-only, arrival-ordered log of a conversation's messages.
///
/// The ledger owns its messages; every per-message mutation goes through it
/// so that lookups and ordering stay in one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageLedger {
    pub conversation_id: ConversationId,
    messages: Vec<Message>,
    /// Retry budget applied to drafts that do not carry their own.
    default_max_retries: u32,
}

impl MessageLedger {
    pub fn new(conversation_id: ConversationId) -> Self {
        Self::with_default_max_retries(conversation_id, DEFAULT_MAX_RETRIES)
    }

    pub fn with_default_max_retries(conversation_id: ConversationId, max_retries: u32) -> Self {
        Self {
            conversation_id,
            messages: Vec::new(),
            default_max_retries: max_retries,
        }
    }

    /// Appends a draft as a new pending message and returns its id.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the draft content is empty.
    pub fn append(&mut self, draft: NewMessage) -> Result<MessageId, DomainError> {
        let message = Message::new(self.conversation_id, draft, self.default_max_retries)?;
        let id = message.id;
        self.messages.push(message);
        Ok(id)
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Messages in arrival order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Count of inbound messages not yet read.
    pub fn unread_inbound_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.is_inbound() && m.status != MessageStatus::Read)
            .count()
    }

    pub fn count_by_direction(&self, direction: MessageDirection) -> usize {
        self.messages
            .iter()
            .filter(|m| m.direction == direction)
            .count()
    }

    pub fn mark_as_sent(&mut self, id: MessageId) -> Result<(), DomainError> {
        self.message_mut(id)?.mark_as_sent()
    }

    pub fn mark_as_delivered(&mut self, id: MessageId) -> Result<(), DomainError> {
        self.message_mut(id)?.mark_as_delivered()
    }

    pub fn mark_as_read(&mut self, id: MessageId, actor: UserId) -> Result<(), DomainError> {
        self.message_mut(id)?.mark_as_read(actor)
    }

    /// Records a send failure for a message.
    pub fn fail(&mut self, id: MessageId, reason: impl Into<String>) -> Result<(), DomainError> {
        let message = self.message_mut(id)?;
        let reason = reason.into();
        warn!(
            message_id = %id,
            retry_count = message.delivery.retry_count + 1,
            %reason,
            "message delivery failed"
        );
        message.fail(reason)
    }

    /// Re-queues a failed message if its retry budget allows.
    ///
    /// Returns `Ok(false)` when the budget is exhausted; the message stays
    /// failed and needs operator attention.
    pub fn retry(&mut self, id: MessageId) -> Result<bool, DomainError> {
        let message = self.message_mut(id)?;
        let requeued = message.retry();
        if !requeued {
            warn!(
                message_id = %id,
                max_retries = message.delivery.max_retries,
                "retry budget exhausted, message stays failed"
            );
        }
        Ok(requeued)
    }

    pub fn edit(&mut self, id: MessageId, new_content: impl Into<String>) -> Result<(), DomainError> {
        self.message_mut(id)?.edit(new_content)
    }

    pub fn delete(&mut self, id: MessageId) -> Result<(), DomainError> {
        self.message_mut(id)?.delete();
        Ok(())
    }

    fn message_mut(&mut self, id: MessageId) -> Result<&mut Message, DomainError> {
        self.messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::MessageNotFound, id.to_string()))
    }
}
