use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Channel the conversation runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationChannel {
    #[default]
    Whatsapp,
    Webchat,
    Telegram,
    Instagram,
}

impl std::fmt::Display for ConversationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Whatsapp => "whatsapp",
            Self::Webchat => "webchat",
            Self::Telegram => "telegram",
            Self::Instagram => "instagram",
        };
        f.write_str(s)
    }
}

/// Which kind of agent currently drives the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    #[default]
    Ai,
    Human,
    System,
}

/// Visibility of a conversation note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    #[default]
    Internal,
    CustomerFacing,
}

/// Free-form note attached to a conversation by an operator or the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationNote {
    pub author: String,
    pub content: String,
    pub note_type: NoteType,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_serializes_snake_case() {
        let json = serde_json::to_string(&ConversationChannel::Whatsapp).unwrap();
        assert_eq!(json, "\"whatsapp\"");
    }

    #[test]
    fn defaults_match_new_conversation_expectations() {
        assert_eq!(ConversationChannel::default(), ConversationChannel::Whatsapp);
        assert_eq!(AgentType::default(), AgentType::Ai);
    }
}
