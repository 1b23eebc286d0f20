use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use bizdash_core::breakeven::{self, BreakEvenInputs, BreakEvenRequest};

use crate::input;

/// Arguments for break-even analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BreakevenArgs {
    /// Total fixed costs for the period
    #[arg(long)]
    pub fixed_costs: Option<Decimal>,

    /// Variable cost per unit
    #[arg(long)]
    pub variable_cost: Option<Decimal>,

    /// Selling price per unit
    #[arg(long)]
    pub selling_price: Option<Decimal>,

    /// Units expected to sell in the period (enables margin of safety)
    #[arg(long)]
    pub expected_units: Option<Decimal>,

    /// Volume to project profit at (repeatable)
    #[arg(long = "volume")]
    pub volumes: Vec<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_breakeven(args: BreakevenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: BreakEvenRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        BreakEvenRequest {
            inputs: BreakEvenInputs {
                fixed_costs: args
                    .fixed_costs
                    .ok_or("--fixed-costs is required (or provide --input)")?,
                variable_cost_per_unit: args
                    .variable_cost
                    .ok_or("--variable-cost is required (or provide --input)")?,
                selling_price_per_unit: args
                    .selling_price
                    .ok_or("--selling-price is required (or provide --input)")?,
                expected_units: args.expected_units,
            },
            volumes: args.volumes,
        }
    };

    let result = breakeven::analyze_break_even(&request)?;
    Ok(serde_json::to_value(result)?)
}
