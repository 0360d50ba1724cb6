//! Message entity.
//!
//! Messages belong to exactly one conversation and track their own delivery
//! lifecycle. Edits and deletions are non-destructive: the underlying
//! content is retained and display derivation applies the masking.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, MessageId, Timestamp, UserId, ValidationError,
};
use crate::domain::foundation::StateMachine;

use super::{DeliveryInfo, MessageDirection, MessageStatus, MessageType, SenderType};

/// Placeholder shown in place of deleted message content.
pub const DELETED_PLACEHOLDER: &str = "[Message deleted]";

/// Sentiment classification attached by the AI pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// Sentiment score and label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Model score in [-1.0, 1.0].
    pub score: f64,
    pub label: SentimentLabel,
}

/// Analysis metadata attached by the AI pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AiMetadata {
    /// Detected customer intent, e.g. "pricing_question".
    pub intent: Option<String>,

    /// Model confidence in [0.0, 1.0].
    pub confidence: Option<f64>,

    pub sentiment: Option<Sentiment>,

    /// BCP 47 language tag of the content.
    pub language: Option<String>,

    /// True when the pipeline recommends a human takeover.
    pub requires_human: Option<bool>,
}

impl AiMetadata {
    /// Merges present fields of `other` into self, keeping existing values
    /// where `other` is silent.
    pub fn merge(&mut self, other: AiMetadata) {
        if other.intent.is_some() {
            self.intent = other.intent;
        }
        if other.confidence.is_some() {
            self.confidence = other.confidence;
        }
        if other.sentiment.is_some() {
            self.sentiment = other.sentiment;
        }
        if other.language.is_some() {
            self.language = other.language;
        }
        if other.requires_human.is_some() {
            self.requires_human = other.requires_human;
        }
    }
}

/// Draft of a message to be appended to a ledger.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub content: String,
    pub message_type: MessageType,
    pub direction: MessageDirection,
    pub sender_type: SenderType,
    /// Channel-side message id (WhatsApp message id, etc.).
    pub external_id: Option<String>,
    pub ai_metadata: Option<AiMetadata>,
    /// Retry budget override; ledger default applies when absent.
    pub max_retries: Option<u32>,
}

impl NewMessage {
    /// Creates a plain text draft with defaults for everything else.
    pub fn text(
        content: impl Into<String>,
        direction: MessageDirection,
        sender_type: SenderType,
    ) -> Self {
        Self {
            content: content.into(),
            message_type: MessageType::Text,
            direction,
            sender_type,
            external_id: None,
            ai_metadata: None,
            max_retries: None,
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub message_type: MessageType,
    pub direction: MessageDirection,
    pub sender_type: SenderType,
    pub status: MessageStatus,

    /// Raw content; retained even after deletion.
    pub content: String,

    /// Channel-side message id, if the channel reported one.
    pub external_id: Option<String>,

    pub ai_metadata: Option<AiMetadata>,

    pub is_edited: bool,
    pub edited_at: Option<Timestamp>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,

    pub delivery: DeliveryInfo,

    /// Users who have read this message, deduplicated.
    pub read_by: Vec<UserId>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Message {
    /// Creates a pending message from a draft.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the content is empty or whitespace.
    pub fn new(
        conversation_id: ConversationId,
        draft: NewMessage,
        default_max_retries: u32,
    ) -> Result<Self, DomainError> {
        if draft.content.trim().is_empty() {
            return Err(ValidationError::empty_field("content").into());
        }
        let now = Timestamp::now();
        Ok(Self {
            id: MessageId::new(),
            conversation_id,
            message_type: draft.message_type,
            direction: draft.direction,
            sender_type: draft.sender_type,
            status: MessageStatus::Pending,
            content: draft.content,
            external_id: draft.external_id,
            ai_metadata: draft.ai_metadata,
            is_edited: false,
            edited_at: None,
            is_deleted: false,
            deleted_at: None,
            delivery: DeliveryInfo::with_max_retries(
                draft.max_retries.unwrap_or(default_max_retries),
            ),
            read_by: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Marks the message as handed to the channel.
    ///
    /// Re-applying the current status refreshes its timestamp; moving
    /// backwards is an error.
    pub fn mark_as_sent(&mut self) -> Result<(), DomainError> {
        if self.status != MessageStatus::Sent {
            self.transition(MessageStatus::Sent)?;
        }
        self.delivery.sent_at = Some(Timestamp::now());
        self.touch();
        Ok(())
    }

    /// Marks the message as delivered by the channel.
    pub fn mark_as_delivered(&mut self) -> Result<(), DomainError> {
        if self.status != MessageStatus::Delivered {
            self.transition(MessageStatus::Delivered)?;
        }
        self.delivery.delivered_at = Some(Timestamp::now());
        self.touch();
        Ok(())
    }

    /// Marks the message as read by `actor`, recording them in the reader
    /// list exactly once.
    pub fn mark_as_read(&mut self, actor: UserId) -> Result<(), DomainError> {
        if self.status != MessageStatus::Read {
            self.transition(MessageStatus::Read)?;
        }
        if !self.read_by.contains(&actor) {
            self.read_by.push(actor);
        }
        self.delivery.read_at = Some(Timestamp::now());
        self.touch();
        Ok(())
    }

    /// Records a send failure and spends one retry.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        if self.status != MessageStatus::Failed {
            self.transition(MessageStatus::Failed)?;
        }
        self.delivery.record_failure(reason, Timestamp::now());
        self.touch();
        Ok(())
    }

    /// Re-queues the message for sending if the retry budget allows.
    ///
    /// Returns true and resets the status to pending while
    /// `retry_count < max_retries`; otherwise returns false and leaves the
    /// message untouched. Callers must check the return value — exhaustion
    /// is a policy outcome, not an error.
    pub fn retry(&mut self) -> bool {
        if self.delivery.can_retry() {
            self.status = MessageStatus::Pending;
            self.touch();
            true
        } else {
            false
        }
    }

    /// Replaces the content, flagging the message as edited.
    pub fn edit(&mut self, new_content: impl Into<String>) -> Result<(), DomainError> {
        let new_content = new_content.into();
        if new_content.trim().is_empty() {
            return Err(ValidationError::empty_field("content").into());
        }
        self.content = new_content;
        self.is_edited = true;
        self.edited_at = Some(Timestamp::now());
        self.touch();
        Ok(())
    }

    /// Flags the message as deleted. Content is retained; display
    /// derivation substitutes the placeholder.
    pub fn delete(&mut self) {
        self.is_deleted = true;
        self.deleted_at = Some(Timestamp::now());
        self.touch();
    }

    /// Content as it should be displayed, accounting for deletion and
    /// edit markers.
    pub fn display_content(&self) -> String {
        if self.is_deleted {
            return DELETED_PLACEHOLDER.to_string();
        }
        if self.is_edited && self.delivery.read_at.is_some() {
            return format!("{} (edited)", self.content);
        }
        self.content.clone()
    }

    /// Merges AI pipeline metadata into the message.
    pub fn update_ai_metadata(&mut self, metadata: AiMetadata) {
        match &mut self.ai_metadata {
            Some(existing) => existing.merge(metadata),
            None => self.ai_metadata = Some(metadata),
        }
        self.touch();
    }

    pub fn is_inbound(&self) -> bool {
        self.direction == MessageDirection::Inbound
    }

    pub fn is_customer_message(&self) -> bool {
        self.sender_type == SenderType::Customer
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    fn transition(&mut self, target: MessageStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition message from {:?} to {:?}",
                    self.status, target
                ),
            )
        })?;
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
