use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transactions::Transaction;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::BizDashResult;

/// A customer with no visit in this many months counts as inactive.
pub const ACTIVE_WINDOW_MONTHS: u32 = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Inactive,
}

/// Per-client rollup of income transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    /// Lower-cased client name with whitespace runs replaced by `-`
    pub id: String,
    pub name: String,
    pub total_spent: Money,
    pub visit_count: u32,
    pub last_visit: NaiveDate,
    /// total_spent / visit_count
    pub average_spend: Money,
    /// Distinct services in the order first booked
    pub services: Vec<String>,
    pub status: CustomerStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomersInput {
    pub transactions: Vec<Transaction>,
    /// Activity is judged relative to this date
    pub reference_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn customer_id(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

fn status_at(last_visit: NaiveDate, reference_date: NaiveDate) -> CustomerStatus {
    let cutoff = reference_date
        .checked_sub_months(Months::new(ACTIVE_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    if last_visit > cutoff {
        CustomerStatus::Active
    } else {
        CustomerStatus::Inactive
    }
}

// ---------------------------------------------------------------------------
// Function 1: customer_summaries
// ---------------------------------------------------------------------------

/// Group income transactions by client, highest total spend first.
///
/// Transactions without a client are skipped. A customer is active when the
/// last visit falls strictly after `reference_date` minus three months.
pub fn customer_summaries(
    transactions: &[Transaction],
    reference_date: NaiveDate,
) -> Vec<CustomerSummary> {
    let mut by_client: BTreeMap<&str, CustomerSummary> = BTreeMap::new();

    for t in transactions.iter().filter(|t| t.is_income()) {
        let Some(client) = t.client_name() else {
            continue;
        };
        let entry = by_client.entry(client).or_insert_with(|| CustomerSummary {
            id: customer_id(client),
            name: client.to_string(),
            total_spent: Decimal::ZERO,
            visit_count: 0,
            last_visit: t.date,
            average_spend: Decimal::ZERO,
            services: Vec::new(),
            status: CustomerStatus::Inactive,
        });
        entry.total_spent = entry.total_spent.saturating_add(t.amount);
        entry.visit_count += 1;
        entry.last_visit = entry.last_visit.max(t.date);
        if let Some(service) = t.service_name() {
            if !entry.services.iter().any(|s| s == service) {
                entry.services.push(service.to_string());
            }
        }
    }

    let mut customers: Vec<CustomerSummary> = by_client
        .into_values()
        .map(|mut c| {
            c.average_spend = c.total_spent / Decimal::from(c.visit_count);
            c.status = status_at(c.last_visit, reference_date);
            c
        })
        .collect();
    customers.sort_by(|a, b| {
        b.total_spent
            .cmp(&a.total_spent)
            .then_with(|| a.name.cmp(&b.name))
    });

    debug!(
        %reference_date,
        customers = customers.len(),
        "rolled up income by client"
    );

    customers
}

// ---------------------------------------------------------------------------
// Function 2: analyze_customers
// ---------------------------------------------------------------------------

/// Enveloped customer rollup.
pub fn analyze_customers(
    input: &CustomersInput,
) -> BizDashResult<ComputationOutput<Vec<CustomerSummary>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let customers = customer_summaries(&input.transactions, input.reference_date);

    let anonymous = input
        .transactions
        .iter()
        .filter(|t| t.is_income() && t.client_name().is_none())
        .count();
    if anonymous > 0 {
        warnings.push(format!(
            "{} income transaction(s) have no client and are not attributed",
            anonymous
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Per-client spend, visit frequency and activity rollup",
        &serde_json::json!({
            "reference_date": input.reference_date.to_string(),
            "active_window_months": ACTIVE_WINDOW_MONTHS,
            "transactions": input.transactions.len(),
        }),
        warnings,
        elapsed,
        customers,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
