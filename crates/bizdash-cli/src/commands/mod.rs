pub mod breakeven;
pub mod customers;
pub mod metrics;
pub mod sample;
pub mod transactions;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use bizdash_core::dashboard::fixtures;
use bizdash_core::transactions::Transaction;

use crate::input;

/// Transactions plus an optional reference date, read from a file, stdin
/// or the sample set.
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub reference_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct LedgerFile {
    transactions: Vec<Transaction>,
    #[serde(default)]
    reference_date: Option<NaiveDate>,
}

/// Accepts a bare transaction array or an object with `transactions`.
fn ledger_from_value(data: Value) -> Result<Ledger, Box<dyn std::error::Error>> {
    let file: LedgerFile = match data {
        Value::Array(items) => LedgerFile {
            transactions: serde_json::from_value(Value::Array(items))?,
            reference_date: None,
        },
        other => serde_json::from_value(other)?,
    };
    Ok(Ledger {
        transactions: file
            .transactions
            .into_iter()
            .map(Transaction::tag_revenue_class)
            .collect(),
        reference_date: file.reference_date,
    })
}

pub fn load_ledger(
    path: Option<&str>,
    sample: bool,
    command: &str,
) -> Result<Ledger, Box<dyn std::error::Error>> {
    let data = match path {
        Some(path) => Some(input::file::read_json_value(path)?),
        None if sample => None,
        None => input::stdin::read_stdin()?,
    };
    match data {
        Some(value) => ledger_from_value(value),
        None if sample => Ok(Ledger {
            transactions: fixtures::sample_transactions(),
            reference_date: None,
        }),
        None => Err(format!(
            "--input <file.json>, --sample or stdin required for {}",
            command
        )
        .into()),
    }
}
