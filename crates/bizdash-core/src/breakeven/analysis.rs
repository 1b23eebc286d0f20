use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::advice::{ContributionMarginAdvice, SafetyMarginAdvice};
use crate::error::BizDashError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Units};
use crate::BizDashResult;

/// Number of points in the break-even chart series.
const CHART_POINTS: u32 = 20;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenInputs {
    /// Total fixed costs for the period
    pub fixed_costs: Money,
    pub variable_cost_per_unit: Money,
    pub selling_price_per_unit: Money,
    /// Units expected to sell in the period; drives margin of safety
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_units: Option<Units>,
}

/// Result of a break-even calculation. The default value stands for
/// "nothing computed yet".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenAnalysis {
    /// Break-even revenue: break_even_units * selling price
    pub break_even_point: Money,
    /// fixed_costs / contribution_margin_per_unit
    pub break_even_units: Units,
    /// (expected - break-even) / expected * 100, zero without expected units
    pub margin_of_safety: Percent,
    /// contribution_margin_per_unit / selling price * 100
    pub contribution_margin: Percent,
    /// Selling price - variable cost
    pub contribution_margin_per_unit: Money,
    pub fixed_costs: Money,
    /// Total variable costs at break-even volume
    pub variable_costs: Money,
}

/// One point of the revenue vs total cost series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub units: Units,
    pub revenue: Money,
    pub total_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitProjection {
    pub volume: Units,
    pub profit: Money,
}

/// Input for the enveloped break-even analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenRequest {
    #[serde(flatten)]
    pub inputs: BreakEvenInputs,
    /// Volumes to project profit at
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Units>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenReport {
    pub analysis: BreakEvenAnalysis,
    pub contribution_margin_advice: ContributionMarginAdvice,
    /// Only present when expected units were supplied
    pub safety_margin_advice: Option<SafetyMarginAdvice>,
    pub recommendations: Vec<String>,
    pub profit_projections: Vec<ProfitProjection>,
    pub chart: Vec<ChartPoint>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_non_negative(field: &str, value: Decimal) -> BizDashResult<()> {
    if value < dec!(0) {
        return Err(BizDashError::InvalidInput {
            field: field.to_string(),
            reason: "Value cannot be negative".to_string(),
        });
    }
    Ok(())
}

/// Unwrap a checked operation, reporting overflow against the input that
/// drove it out of range.
fn in_range(field: &str, value: Option<Decimal>) -> BizDashResult<Decimal> {
    value.ok_or_else(|| BizDashError::InvalidInput {
        field: field.to_string(),
        reason: "Value is too large to compute a break-even from".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Function 1: compute_break_even
// ---------------------------------------------------------------------------

/// Compute break-even volume and revenue, contribution margin and margin of
/// safety.
///
/// Fails with [`BizDashError::UndefinedBreakEven`] when each unit sold does
/// not contribute anything towards fixed costs (selling price at or below
/// variable cost, which includes a zero selling price). Inputs whose
/// results exceed the `Decimal` range fail with [`BizDashError::InvalidInput`].
pub fn compute_break_even(inputs: &BreakEvenInputs) -> BizDashResult<BreakEvenAnalysis> {
    require_non_negative("fixed_costs", inputs.fixed_costs)?;
    require_non_negative("variable_cost_per_unit", inputs.variable_cost_per_unit)?;
    require_non_negative("selling_price_per_unit", inputs.selling_price_per_unit)?;
    if let Some(expected) = inputs.expected_units {
        require_non_negative("expected_units", expected)?;
    }

    debug!(
        fixed_costs = %inputs.fixed_costs,
        variable_cost_per_unit = %inputs.variable_cost_per_unit,
        selling_price_per_unit = %inputs.selling_price_per_unit,
        "computing break-even"
    );

    let contribution_margin_per_unit =
        inputs.selling_price_per_unit - inputs.variable_cost_per_unit;

    if contribution_margin_per_unit <= dec!(0) {
        return Err(BizDashError::UndefinedBreakEven(format!(
            "selling price {} does not exceed variable cost {} per unit",
            inputs.selling_price_per_unit, inputs.variable_cost_per_unit
        )));
    }

    let break_even_units = in_range(
        "fixed_costs",
        inputs.fixed_costs.checked_div(contribution_margin_per_unit),
    )?;
    let break_even_point = in_range(
        "fixed_costs",
        break_even_units.checked_mul(inputs.selling_price_per_unit),
    )?;
    // variable cost < selling price, so this cannot exceed break_even_point
    let variable_costs = break_even_units * inputs.variable_cost_per_unit;
    let contribution_margin =
        contribution_margin_per_unit / inputs.selling_price_per_unit * dec!(100);

    let margin_of_safety = match inputs.expected_units {
        Some(expected) if !expected.is_zero() => in_range(
            "expected_units",
            (expected - break_even_units)
                .checked_div(expected)
                .and_then(|ratio| ratio.checked_mul(dec!(100))),
        )?,
        _ => Decimal::ZERO,
    };

    Ok(BreakEvenAnalysis {
        break_even_point,
        break_even_units,
        margin_of_safety,
        contribution_margin,
        contribution_margin_per_unit,
        fixed_costs: inputs.fixed_costs,
        variable_costs,
    })
}

// ---------------------------------------------------------------------------
// Function 2: profit_at_volume
// ---------------------------------------------------------------------------

/// Projected profit at `volume` units, derived from a previous analysis.
/// Returns zero while no break-even point has been computed. Revenue and
/// costs saturate at the `Decimal` bounds for volumes beyond its range.
pub fn profit_at_volume(volume: Units, analysis: &BreakEvenAnalysis) -> Money {
    if analysis.break_even_point.is_zero() || analysis.break_even_units.is_zero() {
        return Decimal::ZERO;
    }

    let price_per_unit = analysis
        .break_even_point
        .checked_div(analysis.break_even_units)
        .unwrap_or(Decimal::MAX);
    let variable_per_unit = analysis
        .variable_costs
        .checked_div(analysis.break_even_units)
        .unwrap_or(Decimal::MAX);

    let revenue = volume.saturating_mul(price_per_unit);
    let total_costs = analysis
        .fixed_costs
        .saturating_add(volume.saturating_mul(variable_per_unit));
    revenue.saturating_sub(total_costs)
}

// ---------------------------------------------------------------------------
// Function 3: break_even_chart
// ---------------------------------------------------------------------------

/// Revenue and total cost at 10%, 20%, ... 200% of the break-even volume.
/// Points past the `Decimal` range are capped at `Decimal::MAX`.
pub fn break_even_chart(inputs: &BreakEvenInputs, analysis: &BreakEvenAnalysis) -> Vec<ChartPoint> {
    (1..=CHART_POINTS)
        .map(|i| {
            let step = Decimal::from(i) / dec!(10);
            let units = analysis.break_even_units.saturating_mul(step);
            ChartPoint {
                units,
                revenue: units.saturating_mul(inputs.selling_price_per_unit),
                total_cost: inputs
                    .fixed_costs
                    .saturating_add(units.saturating_mul(inputs.variable_cost_per_unit)),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Function 4: analyze_break_even
// ---------------------------------------------------------------------------

/// Break-even analysis bundled with advisory bands, profit projections and
/// the chart series.
pub fn analyze_break_even(
    request: &BreakEvenRequest,
) -> BizDashResult<ComputationOutput<BreakEvenReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let inputs = &request.inputs;

    let analysis = compute_break_even(inputs)?;

    let contribution_margin_advice = ContributionMarginAdvice::classify(analysis.contribution_margin);
    let safety_margin_advice = match inputs.expected_units {
        Some(expected) if !expected.is_zero() => {
            Some(SafetyMarginAdvice::classify(analysis.margin_of_safety))
        }
        _ => {
            warnings.push("No expected units supplied; margin of safety reported as 0".to_string());
            None
        }
    };

    let mut recommendations = vec![contribution_margin_advice.message().to_string()];
    if let Some(advice) = safety_margin_advice {
        recommendations.push(advice.message().to_string());
    }

    if inputs.fixed_costs.is_zero() {
        warnings.push(
            "Fixed costs are zero; break-even is at zero units and profit projections are 0"
                .to_string(),
        );
    }

    let profit_projections = request
        .volumes
        .iter()
        .map(|&volume| ProfitProjection {
            volume,
            profit: profit_at_volume(volume, &analysis),
        })
        .collect();

    let chart = break_even_chart(inputs, &analysis);

    let report = BreakEvenReport {
        analysis,
        contribution_margin_advice,
        safety_margin_advice,
        recommendations,
        profit_projections,
        chart,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Break-even Analysis with Contribution Margin and Margin of Safety",
        &serde_json::json!({
            "fixed_costs": inputs.fixed_costs.to_string(),
            "variable_cost_per_unit": inputs.variable_cost_per_unit.to_string(),
            "selling_price_per_unit": inputs.selling_price_per_unit.to_string(),
            "expected_units": inputs.expected_units.map(|u| u.to_string()),
        }),
        warnings,
        elapsed,
        report,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
