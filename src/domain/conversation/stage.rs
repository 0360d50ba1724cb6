use serde::{Deserialize, Serialize};

/// Sales funnel stage of a conversation.
///
/// Stages carry a nominal ordering for reporting, but advancing is a plain
/// set operation. Sales rarely move strictly forward, so adjacency is not
/// enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    #[default]
    Greeting,
    Qualification,
    Presentation,
    ObjectionHandling,
    Closing,
    Payment,
    Completion,
    Handoff,
}

impl ConversationStage {
    /// Position in the nominal funnel, for dashboard ordering.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Greeting => 0,
            Self::Qualification => 1,
            Self::Presentation => 2,
            Self::ObjectionHandling => 3,
            Self::Closing => 4,
            Self::Payment => 5,
            Self::Completion => 6,
            Self::Handoff => 7,
        }
    }

    /// True once money is on the table.
    pub fn is_commitment_stage(self) -> bool {
        matches!(self, Self::Closing | Self::Payment | Self::Completion)
    }
}

impl std::fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::Qualification => "qualification",
            Self::Presentation => "presentation",
            Self::ObjectionHandling => "objection_handling",
            Self::Closing => "closing",
            Self::Payment => "payment",
            Self::Completion => "completion",
            Self::Handoff => "handoff",
        };
        f.write_str(s)
    }
}
