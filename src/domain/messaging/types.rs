//! Message classification enums.

use serde::{Deserialize, Serialize};

/// The payload kind of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    Video,
    Audio,
    Document,
    Location,
    Contact,
    Template,
    QuickReply,
    Button,
    Interactive,
}

impl MessageType {
    /// Returns true for media payloads carried as attachments.
    pub fn has_media(&self) -> bool {
        matches!(
            self,
            Self::Image | Self::Video | Self::Audio | Self::Document
        )
    }

    /// Returns true for interactive payloads the channel renders as widgets.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::QuickReply | Self::Button | Self::Interactive)
    }
}

/// Whether a message flows into or out of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    Inbound,
    Outbound,
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderType {
    Customer,
    AiAgent,
    HumanAgent,
    System,
    Bot,
}

impl SenderType {
    /// Returns true for either kind of agent.
    pub fn is_agent(&self) -> bool {
        matches!(self, Self::AiAgent | Self::HumanAgent)
    }
}
