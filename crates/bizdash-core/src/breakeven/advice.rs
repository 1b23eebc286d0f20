use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

/// How much room expected sales leave above break-even.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyMarginAdvice {
    /// margin < 0
    BelowBreakEven,
    /// 0 <= margin < 10
    LowBuffer,
    /// 10 <= margin < 20
    ModerateBuffer,
    /// margin >= 20
    HealthyBuffer,
}

impl SafetyMarginAdvice {
    pub fn classify(margin_of_safety: Percent) -> Self {
        if margin_of_safety < dec!(0) {
            SafetyMarginAdvice::BelowBreakEven
        } else if margin_of_safety < dec!(10) {
            SafetyMarginAdvice::LowBuffer
        } else if margin_of_safety < dec!(20) {
            SafetyMarginAdvice::ModerateBuffer
        } else {
            SafetyMarginAdvice::HealthyBuffer
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SafetyMarginAdvice::BelowBreakEven => {
                "Your business is operating below the break-even point. Consider reducing costs or increasing prices."
            }
            SafetyMarginAdvice::LowBuffer => {
                "Your safety margin is low. Look for ways to increase sales or reduce costs to improve your buffer."
            }
            SafetyMarginAdvice::ModerateBuffer => {
                "You have a moderate safety margin. Continue monitoring and look for optimization opportunities."
            }
            SafetyMarginAdvice::HealthyBuffer => {
                "You have a healthy safety margin. Consider investing in growth or expansion."
            }
        }
    }
}

/// Strength of the per-unit contribution margin ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionMarginAdvice {
    /// margin < 20
    Low,
    /// 20 <= margin < 40
    Moderate,
    /// margin >= 40
    Strong,
}

impl ContributionMarginAdvice {
    pub fn classify(contribution_margin: Percent) -> Self {
        if contribution_margin < dec!(20) {
            ContributionMarginAdvice::Low
        } else if contribution_margin < dec!(40) {
            ContributionMarginAdvice::Moderate
        } else {
            ContributionMarginAdvice::Strong
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ContributionMarginAdvice::Low => {
                "Your contribution margin is low. Consider increasing prices or finding ways to reduce variable costs."
            }
            ContributionMarginAdvice::Moderate => {
                "Your contribution margin is moderate. Look for opportunities to improve efficiency."
            }
            ContributionMarginAdvice::Strong => {
                "You have a strong contribution margin. Focus on maintaining your competitive advantage."
            }
        }
    }
}

pub fn safety_margin_advice(margin_of_safety: Percent) -> SafetyMarginAdvice {
    SafetyMarginAdvice::classify(margin_of_safety)
}

pub fn contribution_margin_advice(contribution_margin: Percent) -> ContributionMarginAdvice {
    ContributionMarginAdvice::classify(contribution_margin)
}
