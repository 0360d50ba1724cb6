use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::foundation::{
    AgentId, ConversationId, MerchantId, Money, StateMachine, Timestamp,
};
use crate::domain::messaging::SenderType;

use super::{
    AgentType, ConversationChannel, ConversationNote, ConversationStage, ConversationStatus,
    LeadQualification, NoteType, QualificationUpdate,
};

/// Running counters over the conversation's message traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConversationContext {
    pub total_messages: u64,
    pub ai_messages: u64,
    pub human_messages: u64,
    pub system_messages: u64,
}

impl ConversationContext {
    fn record(&mut self, sender: SenderType) {
        self.total_messages += 1;
        match sender {
            SenderType::AiAgent | SenderType::Bot => self.ai_messages += 1,
            SenderType::HumanAgent => self.human_messages += 1,
            SenderType::System => self.system_messages += 1,
            SenderType::Customer => {}
        }
    }
}

/// A customer conversation with its qualification and lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub merchant_id: MerchantId,
    /// External customer reference on the channel side.
    pub customer_id: Option<String>,
    pub channel: ConversationChannel,
    pub status: ConversationStatus,
    pub stage: ConversationStage,
    pub current_agent_type: AgentType,
    /// Set only by handoff; None while an AI agent drives.
    pub assigned_agent_id: Option<AgentId>,

    pub customer_name: Option<String>,
    pub customer_email: Option<String>,

    pub qualification: LeadQualification,
    pub context: ConversationContext,

    pub estimated_value: Money,
    /// Set only on completion.
    pub actual_value: Money,
    pub currency: String,

    pub tags: Vec<String>,
    pub notes: Vec<ConversationNote>,

    pub completed_at: Option<Timestamp>,
    pub transferred_at: Option<Timestamp>,
    pub last_activity_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Conversation {
    pub fn new(merchant_id: MerchantId, channel: ConversationChannel) -> Self {
        let now = Timestamp::now();
        Self {
            id: ConversationId::new(),
            merchant_id,
            customer_id: None,
            channel,
            status: ConversationStatus::Active,
            stage: ConversationStage::Greeting,
            current_agent_type: AgentType::Ai,
            assigned_agent_id: None,
            customer_name: None,
            customer_email: None,
            qualification: LeadQualification::default(),
            context: ConversationContext::default(),
            estimated_value: Money::ZERO,
            actual_value: Money::ZERO,
            currency: "TRY".to_string(),
            tags: Vec::new(),
            notes: Vec::new(),
            completed_at: None,
            transferred_at: None,
            last_activity_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ConversationStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == ConversationStatus::Completed
    }

    pub fn is_transferred(&self) -> bool {
        self.status == ConversationStatus::Transferred
    }

    pub fn is_abandoned(&self) -> bool {
        self.status == ConversationStatus::Abandoned
    }

    /// Seconds from creation to completion, or to the last activity while
    /// the conversation is still open.
    pub fn duration_secs(&self) -> i64 {
        let end = self
            .completed_at
            .or(self.last_activity_at)
            .unwrap_or_else(Timestamp::now);
        end.duration_since(&self.created_at).num_seconds()
    }

    /// Actual value captured as a percentage of the estimate. Zero when no
    /// messages were exchanged or no estimate exists.
    pub fn conversion_rate(&self) -> f64 {
        if self.context.total_messages == 0 || self.estimated_value.is_zero() {
            return 0.0;
        }
        self.actual_value.minor() as f64 / self.estimated_value.minor() as f64 * 100.0
    }

    pub fn touch_activity(&mut self) {
        let now = Timestamp::now();
        self.last_activity_at = Some(now);
        self.updated_at = now;
    }

    /// Sets the funnel stage. No adjacency is enforced; sales move back and
    /// forth.
    pub fn advance_stage(&mut self, stage: ConversationStage) {
        self.stage = stage;
        self.touch_activity();
    }

    /// Merges qualification data, records the new score and recomputes the
    /// estimated deal value.
    pub fn update_qualification(&mut self, score: u8, update: QualificationUpdate) {
        self.qualification.merge(update);
        self.qualification.score = score;
        self.estimated_value = self.qualification.estimated_value();
        self.touch_activity();
    }

    /// Hands the conversation to a human agent.
    pub fn transfer_to_human(&mut self, agent_id: AgentId) {
        self.current_agent_type = AgentType::Human;
        self.assigned_agent_id = Some(agent_id);
        self.apply_status(ConversationStatus::Transferred);
        self.stage = ConversationStage::Handoff;
        self.transferred_at = Some(Timestamp::now());
        self.touch_activity();
    }

    /// Closes the conversation as won. `value` overwrites the captured
    /// deal value when given.
    pub fn complete(&mut self, value: Option<Money>) {
        self.apply_status(ConversationStatus::Completed);
        self.completed_at = Some(Timestamp::now());
        if let Some(value) = value {
            self.actual_value = value;
        }
        self.touch_activity();
    }

    /// Closes the conversation as lost.
    pub fn abandon(&mut self) {
        self.apply_status(ConversationStatus::Abandoned);
        self.completed_at = Some(Timestamp::now());
        self.touch_activity();
    }

    /// Mirrors a channel-side status change.
    pub fn set_status(&mut self, status: ConversationStatus) {
        self.apply_status(status);
        self.touch_activity();
    }

    /// Counts a message against the traffic context.
    pub fn record_message(&mut self, sender: SenderType) {
        self.context.record(sender);
        self.touch_activity();
    }

    pub fn add_note(
        &mut self,
        author: impl Into<String>,
        content: impl Into<String>,
        note_type: NoteType,
    ) {
        self.notes.push(ConversationNote {
            author: author.into(),
            content: content.into(),
            note_type,
            created_at: Timestamp::now(),
        });
        self.updated_at = Timestamp::now();
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    // Single funnel for all status writes. Writes outside the advisory
    // transition table are applied anyway but logged, so a stricter policy
    // can later replace this without touching call sites.
    fn apply_status(&mut self, target: ConversationStatus) {
        if target != self.status && !self.status.can_transition_to(&target) {
            warn!(
                conversation_id = %self.id,
                from = %self.status,
                to = %target,
                "conversation status write outside advisory transition table"
            );
        }
        self.status = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{BudgetRange, LeadIntent};

    fn conversation() -> Conversation {
        Conversation::new(MerchantId::new(), ConversationChannel::Whatsapp)
    }

    #[test]
    fn new_conversation_starts_active_in_greeting() {
        let convo = conversation();
        assert_eq!(convo.status, ConversationStatus::Active);
        assert_eq!(convo.stage, ConversationStage::Greeting);
        assert_eq!(convo.current_agent_type, AgentType::Ai);
        assert!(convo.assigned_agent_id.is_none());
    }

    #[test]
    fn qualification_with_budget_scales_ceiling() {
        let mut convo = conversation();
        convo.update_qualification(
            70,
            QualificationUpdate {
                budget: Some(BudgetRange {
                    min: Money::from_major(100),
                    max: Money::from_major(1000),
                    currency: "TRY".into(),
                }),
                intent: Some(LeadIntent::High),
                ..Default::default()
            },
        );

        assert_eq!(convo.estimated_value, Money::from_major(700));
        assert_eq!(convo.qualification.score, 70);
    }

    #[test]
    fn qualification_without_budget_uses_fixed_rate() {
        let mut convo = conversation();
        convo.update_qualification(40, QualificationUpdate::default());
        assert_eq!(convo.estimated_value, Money::from_major(4000));
    }

    #[test]
    fn transfer_assigns_agent_and_moves_to_handoff() {
        let mut convo = conversation();
        convo.transfer_to_human(AgentId::new("agent-7").unwrap());

        assert_eq!(convo.status, ConversationStatus::Transferred);
        assert_eq!(convo.stage, ConversationStage::Handoff);
        assert_eq!(convo.current_agent_type, AgentType::Human);
        assert!(convo.assigned_agent_id.is_some());
        assert!(convo.transferred_at.is_some());
    }

    #[test]
    fn complete_records_value_and_timestamp() {
        let mut convo = conversation();
        convo.complete(Some(Money::from_major(850)));

        assert!(convo.is_completed());
        assert_eq!(convo.actual_value, Money::from_major(850));
        assert!(convo.completed_at.is_some());
    }

    #[test]
    fn complete_without_value_keeps_existing() {
        let mut convo = conversation();
        convo.actual_value = Money::from_major(10);
        convo.complete(None);
        assert_eq!(convo.actual_value, Money::from_major(10));
    }

    #[test]
    fn abandon_marks_completed_timestamp() {
        let mut convo = conversation();
        convo.abandon();
        assert!(convo.is_abandoned());
        assert!(convo.completed_at.is_some());
    }

    #[test]
    fn lenient_status_write_is_applied() {
        let mut convo = conversation();
        convo.complete(None);
        // Out of table, still applied.
        convo.set_status(ConversationStatus::Active);
        assert!(convo.is_active());
    }

    #[test]
    fn message_counters_split_by_sender() {
        let mut convo = conversation();
        convo.record_message(SenderType::Customer);
        convo.record_message(SenderType::AiAgent);
        convo.record_message(SenderType::HumanAgent);
        convo.record_message(SenderType::System);

        assert_eq!(convo.context.total_messages, 4);
        assert_eq!(convo.context.ai_messages, 1);
        assert_eq!(convo.context.human_messages, 1);
        assert_eq!(convo.context.system_messages, 1);
    }

    #[test]
    fn conversion_rate_is_zero_without_traffic() {
        let convo = conversation();
        assert_eq!(convo.conversion_rate(), 0.0);
    }

    #[test]
    fn conversion_rate_compares_actual_to_estimate() {
        let mut convo = conversation();
        convo.record_message(SenderType::Customer);
        convo.update_qualification(50, QualificationUpdate::default());
        convo.complete(Some(Money::from_major(2500)));

        // Estimate 5000, actual 2500.
        assert!((convo.conversion_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tags_are_deduplicated() {
        let mut convo = conversation();
        convo.add_tag("vip");
        convo.add_tag("vip");
        convo.add_tag("tr");
        convo.remove_tag("tr");

        assert_eq!(convo.tags, vec!["vip".to_string()]);
    }
}
