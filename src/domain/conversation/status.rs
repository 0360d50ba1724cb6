use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a conversation.
///
/// The transition table here is advisory. Conversation status writes mirror
/// external channel events and stay lenient; the aggregate logs a warning
/// when a write falls outside this table but applies it anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    #[default]
    Active,
    Waiting,
    Transferred,
    Completed,
    Abandoned,
    Error,
}

impl ConversationStatus {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Active | Self::Waiting)
    }
}

impl StateMachine for ConversationStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Active => vec![
                Self::Waiting,
                Self::Transferred,
                Self::Completed,
                Self::Abandoned,
                Self::Error,
            ],
            Self::Waiting => vec![
                Self::Active,
                Self::Transferred,
                Self::Completed,
                Self::Abandoned,
                Self::Error,
            ],
            Self::Error => vec![Self::Active, Self::Abandoned],
            Self::Transferred | Self::Completed | Self::Abandoned => vec![],
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Transferred | Self::Completed | Self::Abandoned)
    }
}

impl std::fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Waiting => "waiting",
            Self::Transferred => "transferred",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_can_move_anywhere_but_stay() {
        let active = ConversationStatus::Active;
        assert!(active.can_transition_to(&ConversationStatus::Completed));
        assert!(active.can_transition_to(&ConversationStatus::Error));
        assert!(!active.can_transition_to(&ConversationStatus::Active));
    }

    #[test]
    fn completed_is_terminal() {
        assert!(ConversationStatus::Completed.is_terminal());
        assert!(ConversationStatus::Completed.valid_transitions().is_empty());
    }

    #[test]
    fn error_can_recover_to_active() {
        assert!(ConversationStatus::Error.can_transition_to(&ConversationStatus::Active));
        assert!(!ConversationStatus::Error.can_transition_to(&ConversationStatus::Completed));
    }
}
