//! Subscription billing.
//!
//! Subscriptions roll over billing periods on a calendar schedule, carry a
//! static plan-feature table and count per-period usage against plan
//! ceilings.

mod aggregate;
mod interval;
mod plan;
mod status;
mod usage;

pub use aggregate::{DiscountRecord, Subscription, UsagePercentage};
pub use interval::BillingInterval;
pub use plan::{PlanFeatures, SubscriptionPlan, UNLIMITED};
pub use status::SubscriptionStatus;
pub use usage::{UsageCounters, UsageKind};
