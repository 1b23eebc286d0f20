pub mod advice;
pub mod analysis;

pub use advice::{
    contribution_margin_advice, safety_margin_advice, ContributionMarginAdvice,
    SafetyMarginAdvice,
};
pub use analysis::{
    analyze_break_even, break_even_chart, compute_break_even, profit_at_volume,
    BreakEvenAnalysis, BreakEvenInputs, BreakEvenReport, BreakEvenRequest, ChartPoint,
    ProfitProjection,
};
