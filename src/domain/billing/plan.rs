use serde::{Deserialize, Serialize};

/// Sentinel meaning "no ceiling" in plan quota fields.
pub const UNLIMITED: i64 = -1;

/// Commercial subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    #[default]
    Starter,
    Professional,
    Enterprise,
    Custom,
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
            Self::Custom => "custom",
        };
        f.write_str(s)
    }
}

/// Feature set and quotas granted by a plan.
///
/// Quota fields use [`UNLIMITED`] for plans without a ceiling. Features are
/// a pure function of the plan; instances are only ever produced by
/// [`PlanFeatures::for_plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFeatures {
    pub max_conversations: i64,
    pub max_messages: i64,
    pub ai_enabled: bool,
    pub human_handoff: bool,
    pub analytics: bool,
    pub custom_branding: bool,
    pub priority_support: bool,
    pub api_access: bool,
    pub webhook_support: bool,
}

impl PlanFeatures {
    pub fn for_plan(plan: SubscriptionPlan) -> Self {
        match plan {
            SubscriptionPlan::Starter => Self {
                max_conversations: 100,
                max_messages: 1000,
                ai_enabled: true,
                human_handoff: false,
                analytics: true,
                custom_branding: false,
                priority_support: false,
                api_access: false,
                webhook_support: false,
            },
            SubscriptionPlan::Professional => Self {
                max_conversations: 1000,
                max_messages: 10_000,
                ai_enabled: true,
                human_handoff: true,
                analytics: true,
                custom_branding: true,
                priority_support: true,
                api_access: true,
                webhook_support: true,
            },
            SubscriptionPlan::Enterprise | SubscriptionPlan::Custom => Self {
                max_conversations: UNLIMITED,
                max_messages: UNLIMITED,
                ai_enabled: true,
                human_handoff: true,
                analytics: true,
                custom_branding: true,
                priority_support: true,
                api_access: true,
                webhook_support: true,
            },
        }
    }
}
