use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use bizdash_core::analytics;
use bizdash_core::transactions::{
    filter_transactions, TransactionFilter, TransactionStatus, TransactionType,
};

use super::metrics::parse_as_of;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TypeArg {
    Income,
    Expense,
}

impl From<TypeArg> for TransactionType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Income => TransactionType::Income,
            TypeArg::Expense => TransactionType::Expense,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Completed,
    Pending,
    Failed,
}

impl From<StatusArg> for TransactionStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Completed => TransactionStatus::Completed,
            StatusArg::Pending => TransactionStatus::Pending,
            StatusArg::Failed => TransactionStatus::Failed,
        }
    }
}

/// Arguments for listing transactions with the same-day summary
#[derive(Args)]
pub struct TransactionsArgs {
    /// Path to JSON input file (transaction array, or object with transactions)
    #[arg(long)]
    pub input: Option<String>,

    /// Use the built-in sample transactions
    #[arg(long, conflicts_with = "input")]
    pub sample: bool,

    /// Day to summarise and end of the --days range (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,

    #[arg(long = "type", value_enum)]
    pub transaction_type: Option<TypeArg>,

    /// Category name, case-insensitive
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Only the last N days
    #[arg(long)]
    pub days: Option<u32>,
}

pub fn run_transactions(args: TransactionsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ledger = super::load_ledger(args.input.as_deref(), args.sample, "transactions")?;
    let as_of = args
        .as_of
        .or(ledger.reference_date)
        .unwrap_or_else(|| Local::now().date_naive());

    let filter = TransactionFilter {
        transaction_type: args.transaction_type.map(Into::into),
        category: args.category,
        status: args.status.map(Into::into),
        within_days: args.days,
    };
    let matched = filter_transactions(&ledger.transactions, &filter, as_of);
    tracing::debug!(
        matched = matched.len(),
        total = ledger.transactions.len(),
        "filtered transactions"
    );

    Ok(json!({
        "today": analytics::daily_summary(&ledger.transactions, as_of),
        "filter": filter,
        "transactions": matched,
    }))
}
