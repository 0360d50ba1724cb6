use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::foundation::{MerchantId, Money, SubscriptionId, Timestamp, UserId};

use super::{
    BillingInterval, PlanFeatures, SubscriptionPlan, SubscriptionStatus, UsageCounters, UsageKind,
};

/// Days before the next billing date at which renewal work should start.
const RENEWAL_DUE_WINDOW_DAYS: i64 = 3;

/// Audit record of a discount code applied to the subscription.
///
/// Discounts are recorded only; applying them to the price is the billing
/// caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRecord {
    pub code: String,
    pub percentage: u8,
    pub amount: Money,
    pub valid_until: Option<Timestamp>,
    pub applied_at: Timestamp,
}

/// Usage as a percentage of the plan ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsagePercentage {
    pub conversations: f64,
    pub messages: f64,
}

/// A merchant's subscription with its billing period and usage meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub merchant_id: MerchantId,
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub billing_interval: BillingInterval,

    pub amount: Money,
    pub currency: String,
    pub tax_amount: Money,
    pub total_amount: Money,

    pub started_at: Timestamp,
    pub current_period_start: Timestamp,
    pub current_period_end: Timestamp,
    pub next_billing_date: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub cancellation_reason: Option<String>,

    pub plan_features: PlanFeatures,
    pub usage: UsageCounters,
    pub discounts: Vec<DiscountRecord>,

    /// Provider-side subscription id, when mirrored from a provider.
    pub payment_provider_id: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Opens a subscription whose first period starts now.
    pub fn new(
        user_id: UserId,
        merchant_id: MerchantId,
        plan: SubscriptionPlan,
        billing_interval: BillingInterval,
        amount: Money,
    ) -> Self {
        let now = Timestamp::now();
        let period_end = now.add_months(billing_interval.months());
        Self {
            id: SubscriptionId::new(),
            user_id,
            merchant_id,
            plan,
            status: SubscriptionStatus::Active,
            billing_interval,
            amount,
            currency: "TRY".to_string(),
            tax_amount: Money::ZERO,
            total_amount: amount,
            started_at: now,
            current_period_start: now,
            current_period_end: period_end,
            next_billing_date: Some(period_end),
            cancelled_at: None,
            cancellation_reason: None,
            plan_features: PlanFeatures::for_plan(plan),
            usage: UsageCounters::fresh(now),
            discounts: Vec::new(),
            payment_provider_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == SubscriptionStatus::Cancelled
    }

    /// Whole-or-partial days until the next billing date, zero when none is
    /// scheduled.
    pub fn days_until_renewal(&self) -> i64 {
        match &self.next_billing_date {
            Some(next) => Timestamp::now().days_until(next),
            None => 0,
        }
    }

    pub fn is_renewal_due(&self) -> bool {
        self.days_until_renewal() <= RENEWAL_DUE_WINDOW_DAYS
    }

    /// Usage against the plan ceilings. Uncapped resources report 0%.
    ///
    /// A ceiling of zero is treated as uncapped, same as the -1 sentinel.
    pub fn usage_percentage(&self) -> UsagePercentage {
        UsagePercentage {
            conversations: ratio(
                self.usage.conversations_this_period,
                self.plan_features.max_conversations,
            ),
            messages: ratio(
                self.usage.messages_this_period,
                self.plan_features.max_messages,
            ),
        }
    }

    pub fn has_exceeded_limits(&self) -> bool {
        let usage = self.usage_percentage();
        usage.conversations >= 100.0 || usage.messages >= 100.0
    }

    /// Rolls the billing period forward one interval and resets usage.
    ///
    /// The new period starts exactly where the old one ended, so repeated
    /// renewals never drift even when processed late. Month arithmetic
    /// clamps day-of-month overflow to the end of the target month.
    pub fn renew(&mut self) {
        self.current_period_start = self.current_period_end;
        let next_end = self
            .current_period_start
            .add_months(self.billing_interval.months());
        self.current_period_end = next_end;
        self.next_billing_date = Some(next_end);
        self.usage.reset(Timestamp::now());
        self.touch();
    }

    /// Switches plan, reprices and swaps in the new plan's feature table.
    pub fn upgrade(&mut self, plan: SubscriptionPlan, amount: Money) {
        self.plan = plan;
        self.amount = amount;
        self.total_amount = amount + self.tax_amount;
        self.plan_features = PlanFeatures::for_plan(plan);
        self.touch();
    }

    pub fn record_usage(&mut self, kind: UsageKind, count: u64) {
        self.usage.record(kind, count);
        self.touch();
    }

    /// Records usage by resource name. Unknown names are ignored so that
    /// provider-driven meter names can evolve without breaking callers.
    pub fn record_usage_by_name(&mut self, name: &str, count: u64) {
        match name.parse::<UsageKind>() {
            Ok(kind) => self.record_usage(kind, count),
            Err(()) => {
                debug!(subscription_id = %self.id, meter = name, "ignoring unknown usage meter");
            }
        }
    }

    /// Appends a discount audit record. Does not touch the price.
    pub fn apply_discount(
        &mut self,
        code: impl Into<String>,
        percentage: u8,
        amount: Money,
        valid_until: Option<Timestamp>,
    ) {
        self.discounts.push(DiscountRecord {
            code: code.into(),
            percentage,
            amount,
            valid_until,
            applied_at: Timestamp::now(),
        });
        self.touch();
    }

    pub fn cancel(&mut self, reason: Option<String>) {
        self.status = SubscriptionStatus::Cancelled;
        self.cancelled_at = Some(Timestamp::now());
        self.cancellation_reason = reason;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

fn ratio(used: u64, max: i64) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    used as f64 / max as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn starter_monthly() -> Subscription {
        Subscription::new(
            UserId::new("user-1").unwrap(),
            MerchantId::new(),
            SubscriptionPlan::Starter,
            BillingInterval::Monthly,
            Money::from_major(500),
        )
    }

    #[test]
    fn new_subscription_schedules_first_renewal() {
        let sub = starter_monthly();
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.next_billing_date, Some(sub.current_period_end));
        assert_eq!(sub.plan_features, PlanFeatures::for_plan(SubscriptionPlan::Starter));
    }

    #[test]
    fn renew_chains_periods_without_drift() {
        let mut sub = starter_monthly();
        let old_end = sub.current_period_end;
        sub.renew();

        assert_eq!(sub.current_period_start, old_end);
        assert_eq!(sub.next_billing_date, Some(sub.current_period_end));
        assert_eq!(
            sub.current_period_end.as_datetime().month(),
            old_end.add_months(1).as_datetime().month()
        );
    }

    #[test]
    fn renew_resets_all_usage_counters() {
        let mut sub = starter_monthly();
        sub.record_usage(UsageKind::Conversations, 10);
        sub.record_usage(UsageKind::Messages, 200);
        sub.record_usage(UsageKind::AiResponses, 50);
        sub.record_usage(UsageKind::HumanHandovers, 2);
        sub.record_usage(UsageKind::ApiCalls, 7);

        sub.renew();

        assert_eq!(sub.usage.conversations_this_period, 0);
        assert_eq!(sub.usage.messages_this_period, 0);
        assert_eq!(sub.usage.ai_responses, 0);
        assert_eq!(sub.usage.human_handovers, 0);
        assert_eq!(sub.usage.api_calls, 0);
    }

    #[test]
    fn quarterly_renewal_advances_three_months() {
        let mut sub = starter_monthly();
        sub.billing_interval = BillingInterval::Quarterly;
        let old_end = sub.current_period_end;
        sub.renew();

        assert_eq!(sub.current_period_end, old_end.add_months(3));
    }

    #[test]
    fn upgrade_swaps_feature_table_and_reprices() {
        let mut sub = starter_monthly();
        sub.tax_amount = Money::from_major(90);
        sub.upgrade(SubscriptionPlan::Professional, Money::from_major(1500));

        assert_eq!(sub.plan, SubscriptionPlan::Professional);
        assert_eq!(sub.total_amount, Money::from_major(1590));
        assert_eq!(sub.plan_features.max_conversations, 1000);
    }

    #[test]
    fn unknown_usage_meter_is_ignored() {
        let mut sub = starter_monthly();
        sub.record_usage_by_name("disk_space", 5);
        sub.record_usage_by_name("messages", 5);

        assert_eq!(sub.usage.messages_this_period, 5);
    }

    #[test]
    fn usage_percentage_against_starter_caps() {
        let mut sub = starter_monthly();
        sub.record_usage(UsageKind::Conversations, 50);
        sub.record_usage(UsageKind::Messages, 1000);

        let pct = sub.usage_percentage();
        assert!((pct.conversations - 50.0).abs() < f64::EPSILON);
        assert!((pct.messages - 100.0).abs() < f64::EPSILON);
        assert!(sub.has_exceeded_limits());
    }

    #[test]
    fn unlimited_plans_never_exceed_limits() {
        let mut sub = starter_monthly();
        sub.upgrade(SubscriptionPlan::Enterprise, Money::from_major(5000));
        sub.record_usage(UsageKind::Conversations, 1_000_000);

        let pct = sub.usage_percentage();
        assert_eq!(pct.conversations, 0.0);
        assert!(!sub.has_exceeded_limits());
    }

    #[test]
    fn zero_ceiling_counts_as_uncapped() {
        let mut sub = starter_monthly();
        sub.plan_features.max_messages = 0;
        sub.record_usage(UsageKind::Messages, 10);

        assert_eq!(sub.usage_percentage().messages, 0.0);
    }

    #[test]
    fn cancel_records_reason_and_timestamp() {
        let mut sub = starter_monthly();
        sub.cancel(Some("too expensive".into()));

        assert!(sub.is_cancelled());
        assert!(sub.cancelled_at.is_some());
        assert_eq!(sub.cancellation_reason.as_deref(), Some("too expensive"));
    }

    #[test]
    fn discount_is_audit_only() {
        let mut sub = starter_monthly();
        let price_before = sub.total_amount;
        sub.apply_discount("WELCOME10", 10, Money::from_major(50), None);

        assert_eq!(sub.discounts.len(), 1);
        assert_eq!(sub.total_amount, price_before);
    }

    #[test]
    fn renewal_due_within_three_days() {
        let mut sub = starter_monthly();
        sub.next_billing_date = Some(Timestamp::now().add_days(2));
        assert!(sub.is_renewal_due());

        sub.next_billing_date = Some(Timestamp::now().add_days(10));
        assert!(!sub.is_renewal_due());
    }
}
