use serde::{Deserialize, Serialize};

use crate::domain::foundation::Money;

/// Value placed on each qualification point when no budget ceiling is
/// known, in major currency units.
const VALUE_PER_SCORE_POINT: i64 = 100;

/// Customer budget bracket discovered during qualification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: Money,
    pub max: Money,
    /// ISO 4217 code, e.g. "TRY".
    pub currency: String,
}

/// Purchase intent signal from the AI pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadIntent {
    Low,
    Medium,
    High,
}

/// Everything learned about the lead so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LeadQualification {
    pub budget: Option<BudgetRange>,
    /// Free-form purchase timeline, e.g. "this quarter".
    pub timeline: Option<String>,
    pub needs: Vec<String>,
    pub pain_points: Vec<String>,
    pub decision_maker: Option<bool>,
    pub authority: Option<bool>,
    pub intent: Option<LeadIntent>,
    /// 0-100, caller-trusted. Not clamped here.
    pub score: u8,
}

/// Partial qualification data to merge into the current picture.
///
/// Absent fields leave the existing values alone; list fields replace
/// rather than append, since the pipeline re-derives them whole.
#[derive(Debug, Clone, Default)]
pub struct QualificationUpdate {
    pub budget: Option<BudgetRange>,
    pub timeline: Option<String>,
    pub needs: Option<Vec<String>>,
    pub pain_points: Option<Vec<String>>,
    pub decision_maker: Option<bool>,
    pub authority: Option<bool>,
    pub intent: Option<LeadIntent>,
}

impl LeadQualification {
    pub fn merge(&mut self, update: QualificationUpdate) {
        if update.budget.is_some() {
            self.budget = update.budget;
        }
        if update.timeline.is_some() {
            self.timeline = update.timeline;
        }
        if let Some(needs) = update.needs {
            self.needs = needs;
        }
        if let Some(pain_points) = update.pain_points {
            self.pain_points = pain_points;
        }
        if update.decision_maker.is_some() {
            self.decision_maker = update.decision_maker;
        }
        if update.authority.is_some() {
            self.authority = update.authority;
        }
        if update.intent.is_some() {
            self.intent = update.intent;
        }
    }

    /// Deal value implied by the current qualification.
    ///
    /// With a known positive budget ceiling the value is the ceiling scaled
    /// by the score. Without one, each score point is worth a fixed 100
    /// major units.
    pub fn estimated_value(&self) -> Money {
        match &self.budget {
            Some(budget) if budget.max.is_positive() => budget.max.percentage(self.score),
            _ => Money::from_major(i64::from(self.score) * VALUE_PER_SCORE_POINT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(max_major: i64) -> BudgetRange {
        BudgetRange {
            min: Money::ZERO,
            max: Money::from_major(max_major),
            currency: "TRY".into(),
        }
    }

    #[test]
    fn value_scales_budget_ceiling_by_score() {
        let qual = LeadQualification {
            budget: Some(budget(1000)),
            score: 70,
            ..Default::default()
        };
        assert_eq!(qual.estimated_value(), Money::from_major(700));
    }

    #[test]
    fn value_falls_back_to_per_point_rate_without_budget() {
        let qual = LeadQualification {
            score: 40,
            ..Default::default()
        };
        assert_eq!(qual.estimated_value(), Money::from_major(4000));
    }

    #[test]
    fn zero_budget_ceiling_uses_fallback_rate() {
        let qual = LeadQualification {
            budget: Some(budget(0)),
            score: 50,
            ..Default::default()
        };
        assert_eq!(qual.estimated_value(), Money::from_major(5000));
    }

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut qual = LeadQualification {
            timeline: Some("this month".into()),
            needs: vec!["automation".into()],
            score: 30,
            ..Default::default()
        };

        qual.merge(QualificationUpdate {
            intent: Some(LeadIntent::High),
            needs: Some(vec!["automation".into(), "reporting".into()]),
            ..Default::default()
        });

        assert_eq!(qual.timeline.as_deref(), Some("this month"));
        assert_eq!(qual.intent, Some(LeadIntent::High));
        assert_eq!(qual.needs.len(), 2);
        assert_eq!(qual.score, 30);
    }
}
