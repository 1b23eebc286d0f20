use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use bizdash_core::analytics::{CustomersInput, MetricsInput};
use bizdash_core::breakeven::{BreakEvenAnalysis, BreakEvenInputs, BreakEvenRequest};
use bizdash_core::dashboard::{BusinessAction, BusinessState, SampleData};
use bizdash_core::transactions::{Transaction, TransactionFilter};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Bare month-over-month metrics for `{ transactions, reference_date, options? }`.
#[napi]
pub fn compute_metrics(input_json: String) -> NapiResult<String> {
    let input: MetricsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let transactions: Vec<_> = input
        .transactions
        .into_iter()
        .map(bizdash_core::transactions::Transaction::tag_revenue_class)
        .collect();
    let output = bizdash_core::analytics::compute_metrics_with(
        &transactions,
        input.reference_date,
        &input.options,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Metrics wrapped in the computation envelope with warnings.
#[napi]
pub fn analyze_metrics(input_json: String) -> NapiResult<String> {
    let input: MetricsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizdash_core::analytics::analyze_metrics(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Per-client rollup for `{ transactions, reference_date }`.
#[napi]
pub fn customer_summaries(input_json: String) -> NapiResult<String> {
    let input: CustomersInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        bizdash_core::analytics::customer_summaries(&input.transactions, input.reference_date);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_customers(input_json: String) -> NapiResult<String> {
    let input: CustomersInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizdash_core::analytics::analyze_customers(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DayInput {
    transactions: Vec<Transaction>,
    date: chrono::NaiveDate,
}

/// Same-day revenue, appointments and product sales for `{ transactions, date }`.
#[napi]
pub fn daily_summary(input_json: String) -> NapiResult<String> {
    let input: DayInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizdash_core::analytics::daily_summary(&input.transactions, input.date);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct FilterInput {
    transactions: Vec<Transaction>,
    #[serde(default)]
    filter: TransactionFilter,
    reference_date: chrono::NaiveDate,
}

/// Transactions matching `{ filter }`, newest first.
#[napi]
pub fn filter_transactions(input_json: String) -> NapiResult<String> {
    let input: FilterInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizdash_core::transactions::filter_transactions(
        &input.transactions,
        &input.filter,
        input.reference_date,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Break-even
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_break_even(input_json: String) -> NapiResult<String> {
    let input: BreakEvenInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizdash_core::breakeven::compute_break_even(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_break_even(input_json: String) -> NapiResult<String> {
    let input: BreakEvenRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizdash_core::breakeven::analyze_break_even(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct ProfitAtVolumeInput {
    volume: Decimal,
    analysis: BreakEvenAnalysis,
}

/// Returns the projected profit as a decimal string.
#[napi]
pub fn profit_at_volume(input_json: String) -> NapiResult<String> {
    let input: ProfitAtVolumeInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let profit = bizdash_core::breakeven::profit_at_volume(input.volume, &input.analysis);
    Ok(profit.to_string())
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ReduceInput {
    #[serde(default)]
    state: BusinessState,
    action: BusinessAction,
}

/// Apply one action to a state; unknown transaction ids are errors.
#[napi]
pub fn reduce_state(input_json: String) -> NapiResult<String> {
    let input: ReduceInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let next =
        bizdash_core::dashboard::try_reduce(input.state, input.action).map_err(to_napi_error)?;
    serde_json::to_string(&next).map_err(to_napi_error)
}

/// Initial dashboard state loaded from the sample data set.
#[napi]
pub fn sample_state() -> NapiResult<String> {
    let state = bizdash_core::dashboard::load_initial_state(&SampleData);
    serde_json::to_string(&state).map_err(to_napi_error)
}
