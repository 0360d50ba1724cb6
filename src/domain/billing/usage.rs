use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five metered resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    Conversations,
    Messages,
    AiResponses,
    HumanHandovers,
    ApiCalls,
}

impl FromStr for UsageKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conversations" => Ok(Self::Conversations),
            "messages" => Ok(Self::Messages),
            "ai_responses" => Ok(Self::AiResponses),
            "human_handovers" => Ok(Self::HumanHandovers),
            "api_calls" => Ok(Self::ApiCalls),
            _ => Err(()),
        }
    }
}

use crate::domain::foundation::Timestamp;

/// Per-period usage counters, reset on renewal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    pub conversations_this_period: u64,
    pub messages_this_period: u64,
    pub ai_responses: u64,
    pub human_handovers: u64,
    pub api_calls: u64,
    pub last_reset_at: Timestamp,
}

impl UsageCounters {
    pub fn fresh(at: Timestamp) -> Self {
        Self {
            conversations_this_period: 0,
            messages_this_period: 0,
            ai_responses: 0,
            human_handovers: 0,
            api_calls: 0,
            last_reset_at: at,
        }
    }

    pub fn record(&mut self, kind: UsageKind, count: u64) {
        let counter = match kind {
            UsageKind::Conversations => &mut self.conversations_this_period,
            UsageKind::Messages => &mut self.messages_this_period,
            UsageKind::AiResponses => &mut self.ai_responses,
            UsageKind::HumanHandovers => &mut self.human_handovers,
            UsageKind::ApiCalls => &mut self.api_calls,
        };
        *counter += count;
    }

    pub fn reset(&mut self, at: Timestamp) {
        *self = Self::fresh(at);
    }
}

impl Default for UsageCounters {
    fn default() -> Self {
        Self::fresh(Timestamp::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_touches_exactly_one_counter() {
        let mut usage = UsageCounters::default();
        usage.record(UsageKind::Messages, 5);
        usage.record(UsageKind::ApiCalls, 1);

        assert_eq!(usage.messages_this_period, 5);
        assert_eq!(usage.api_calls, 1);
        assert_eq!(usage.conversations_this_period, 0);
    }

    #[test]
    fn reset_zeroes_all_counters() {
        let mut usage = UsageCounters::default();
        usage.record(UsageKind::Conversations, 3);
        usage.record(UsageKind::HumanHandovers, 2);

        let at = Timestamp::now();
        usage.reset(at);

        assert_eq!(usage, UsageCounters::fresh(at));
    }

    #[test]
    fn kind_parses_snake_case_names() {
        assert_eq!("ai_responses".parse(), Ok(UsageKind::AiResponses));
        assert!("disk_space".parse::<UsageKind>().is_err());
    }
}
