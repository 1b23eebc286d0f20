use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::Value;

use bizdash_core::analytics::{self, CustomersInput};

use super::metrics::parse_as_of;

/// Arguments for the per-client rollup
#[derive(Args)]
pub struct CustomersArgs {
    /// Path to JSON input file (transaction array, or object with transactions)
    #[arg(long)]
    pub input: Option<String>,

    /// Use the built-in sample transactions
    #[arg(long, conflicts_with = "input")]
    pub sample: bool,

    /// Date activity is judged from (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,

    /// Only customers seen in the last three months
    #[arg(long)]
    pub active_only: bool,
}

pub fn run_customers(args: CustomersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ledger = super::load_ledger(args.input.as_deref(), args.sample, "customers")?;
    let input = CustomersInput {
        transactions: ledger.transactions,
        reference_date: args
            .as_of
            .or(ledger.reference_date)
            .unwrap_or_else(|| Local::now().date_naive()),
    };

    let mut output = analytics::analyze_customers(&input)?;
    if args.active_only {
        output
            .result
            .retain(|c| c.status == analytics::CustomerStatus::Active);
    }
    Ok(serde_json::to_value(output)?)
}
