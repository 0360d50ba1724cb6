use serde::{Deserialize, Serialize};

/// How often a subscription bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingInterval {
    /// Calendar months added per billing period.
    pub fn months(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Yearly => 12,
        }
    }
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_per_interval() {
        assert_eq!(BillingInterval::Monthly.months(), 1);
        assert_eq!(BillingInterval::Quarterly.months(), 3);
        assert_eq!(BillingInterval::Yearly.months(), 12);
    }
}
