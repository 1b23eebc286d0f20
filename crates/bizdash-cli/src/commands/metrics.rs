use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Deserialize;
use serde_json::{json, Value};

use bizdash_core::analytics::{
    self, format_currency, format_percentage, MetricsInput, MetricsOptions, MetricsResult,
    StatusFilter,
};
use bizdash_core::dashboard::fixtures;
use bizdash_core::transactions::{self, Transaction};

use crate::input;

/// Arguments for month-over-month metrics
#[derive(Args)]
pub struct MetricsArgs {
    /// Path to JSON input file (transaction array, or object with transactions)
    #[arg(long)]
    pub input: Option<String>,

    /// Use the built-in sample transactions
    #[arg(long, conflicts_with = "input")]
    pub sample: bool,

    /// Reference date (YYYY-MM-DD) picking the current month; defaults to today
    #[arg(long, value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,

    /// Count only completed transactions
    #[arg(long)]
    pub completed_only: bool,

    /// Render money and percentages as display strings
    #[arg(long)]
    pub formatted: bool,
}

/// Object form of the metrics input file. Every field but the transactions
/// can come from flags instead.
#[derive(Deserialize)]
struct MetricsFile {
    transactions: Vec<Transaction>,
    #[serde(default)]
    reference_date: Option<NaiveDate>,
    #[serde(default)]
    options: Option<MetricsOptions>,
}

pub(crate) fn parse_as_of(raw: &str) -> Result<NaiveDate, String> {
    transactions::parse_date(raw).map_err(|e| e.to_string())
}

fn build_input(args: &MetricsArgs, data: Option<Value>) -> Result<MetricsInput, Box<dyn std::error::Error>> {
    let file: MetricsFile = match data {
        Some(Value::Array(items)) => MetricsFile {
            transactions: serde_json::from_value(Value::Array(items))?,
            reference_date: None,
            options: None,
        },
        Some(other) => serde_json::from_value(other)?,
        None if args.sample => MetricsFile {
            transactions: fixtures::sample_transactions(),
            reference_date: None,
            options: None,
        },
        None => {
            return Err("--input <file.json>, --sample or stdin required for metrics".into());
        }
    };

    let mut options = file.options.unwrap_or_default();
    if args.completed_only {
        options.status_filter = StatusFilter::CompletedOnly;
    }

    Ok(MetricsInput {
        transactions: file
            .transactions
            .into_iter()
            .map(Transaction::tag_revenue_class)
            .collect(),
        reference_date: args
            .as_of
            .or(file.reference_date)
            .unwrap_or_else(|| Local::now().date_naive()),
        options,
    })
}

/// Display strings for the headline figures.
fn formatted_summary(m: &MetricsResult) -> Value {
    let cur = &m.current_month;
    let by_category = |map: &std::collections::BTreeMap<String, rust_decimal::Decimal>| {
        map.iter()
            .map(|(k, v)| (k.clone(), Value::String(format_currency(*v))))
            .collect::<serde_json::Map<String, Value>>()
    };
    json!({
        "period": format!("{} to {}", m.period.current.start, m.period.current.end),
        "revenue": format_currency(cur.revenue),
        "expenses": format_currency(cur.expenses),
        "profit": format_currency(cur.profit),
        "customer_count": cur.customer_count,
        "average_order_value": format_currency(cur.average_order_value),
        "marketing_expenses": format_currency(cur.marketing_expenses),
        "marketing_roi": format_percentage(cur.marketing_roi),
        "revenue_growth": format_percentage(m.growth.revenue),
        "customer_growth": format_percentage(m.growth.customers),
        "last_month_revenue": format_currency(m.last_month.revenue),
        "last_month_profit": format_currency(m.last_month.profit),
        "revenue_by_category": by_category(&cur.revenue_by_category),
        "expenses_by_category": by_category(&cur.expenses_by_category),
    })
}

pub fn run_metrics(args: MetricsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data = if let Some(ref path) = args.input {
        Some(input::file::read_json_value(path)?)
    } else if args.sample {
        None
    } else {
        input::stdin::read_stdin()?
    };

    let metrics_input = build_input(&args, data)?;
    tracing::debug!(
        transactions = metrics_input.transactions.len(),
        reference_date = %metrics_input.reference_date,
        "running metrics"
    );

    let result = analytics::analyze_metrics(&metrics_input)?;
    let summary = args.formatted.then(|| formatted_summary(&result.result));

    let mut value = serde_json::to_value(result)?;
    if let Some(summary) = summary {
        value["result"] = summary;
    }
    Ok(value)
}
