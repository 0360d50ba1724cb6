//! Conversation lifecycle tracking.
//!
//! A conversation moves through sales stages while an AI agent qualifies
//! the lead. Qualification drives the estimated deal value; completion or
//! handoff to a human closes the tracker's involvement.

mod aggregate;
mod qualification;
mod stage;
mod status;
mod types;

pub use aggregate::{Conversation, ConversationContext};
pub use qualification::{BudgetRange, LeadIntent, LeadQualification, QualificationUpdate};
pub use stage::ConversationStage;
pub use status::ConversationStatus;
pub use types::{AgentType, ConversationChannel, ConversationNote, NoteType};
