use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::transactions::{MonthWindow, RevenueClass, Transaction, TransactionStatus};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::BizDashResult;

/// Expense category whose spend drives the marketing ROI figure.
pub const MARKETING_CATEGORY: &str = "Marketing";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Which transactions count towards the rollups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every transaction, including pending and failed ones.
    #[default]
    All,
    /// Only settled transactions.
    CompletedOnly,
}

impl StatusFilter {
    pub fn includes(&self, status: TransactionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::CompletedOnly => status == TransactionStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsOptions {
    #[serde(default)]
    pub status_filter: StatusFilter,
}

/// Input for the enveloped metrics computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsInput {
    pub transactions: Vec<Transaction>,
    /// "Now" for the purpose of picking the current and prior month
    pub reference_date: NaiveDate,
    #[serde(default)]
    pub options: MetricsOptions,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Totals computed for both the current and the prior month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub revenue: Money,
    /// Sum of absolute expense amounts
    pub expenses: Money,
    /// revenue - expenses
    pub profit: Money,
    /// Distinct non-empty clients among income transactions
    pub customer_count: u32,
}

/// Current-month rollup with the breakdowns only the current month carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentMonthMetrics {
    pub revenue: Money,
    pub expenses: Money,
    pub profit: Money,
    pub customer_count: u32,
    /// Mean income per service transaction; product sales excluded
    pub average_order_value: Money,
    /// (revenue - marketing) / marketing * 100, zero without marketing spend
    pub marketing_roi: Percent,
    pub marketing_expenses: Money,
    /// "Product Sales" / "Services"
    pub revenue_by_category: BTreeMap<String, Money>,
    /// Keyed by each expense's own category
    pub expenses_by_category: BTreeMap<String, Money>,
}

/// Period-over-period growth in percentage points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthRates {
    pub revenue: Percent,
    pub customers: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub current: MonthWindow,
    pub previous: MonthWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub period: ReportingPeriod,
    pub current_month: CurrentMonthMetrics,
    pub last_month: MonthlyTotals,
    pub growth: GrowthRates,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sum that caps at the `Decimal` bounds instead of overflowing.
fn capped_sum(amounts: impl Iterator<Item = Money>) -> Money {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Percentage change from `base`; zero when there is no base to grow from.
/// Changes too large to represent are capped at `Decimal::MAX` / `Decimal::MIN`.
fn growth_pct(current: Decimal, base: Decimal) -> Percent {
    if base.is_zero() {
        return Decimal::ZERO;
    }
    let change = current.saturating_sub(base);
    change
        .checked_div(base)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .unwrap_or(if change.is_sign_negative() == base.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

fn month_totals(transactions: &[&Transaction]) -> MonthlyTotals {
    let revenue = capped_sum(
        transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount),
    );
    let expenses = capped_sum(
        transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.expense_amount()),
    );
    let customers: HashSet<&str> = transactions
        .iter()
        .filter(|t| t.is_income())
        .filter_map(|t| t.client_name())
        .collect();

    MonthlyTotals {
        revenue,
        expenses,
        profit: revenue.saturating_sub(expenses),
        customer_count: customers.len() as u32,
    }
}

fn average_order_value(transactions: &[&Transaction]) -> Money {
    let orders: Vec<Money> = transactions
        .iter()
        .filter(|t| t.is_income())
        .filter(|t| t.service_name().is_some() && t.revenue_class() == RevenueClass::Service)
        .map(|t| t.amount)
        .collect();
    if orders.is_empty() {
        return Decimal::ZERO;
    }
    capped_sum(orders.iter().copied()) / Decimal::from(orders.len())
}

fn revenue_by_category(transactions: &[&Transaction]) -> BTreeMap<String, Money> {
    let mut acc: BTreeMap<String, Money> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_income()) {
        let slot = acc
            .entry(t.revenue_class().label().to_string())
            .or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(t.amount);
    }
    acc
}

fn expenses_by_category(transactions: &[&Transaction]) -> BTreeMap<String, Money> {
    let mut acc: BTreeMap<String, Money> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        let slot = acc.entry(t.category.clone()).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(t.expense_amount());
    }
    acc
}

// ---------------------------------------------------------------------------
// Function 1: compute_metrics
// ---------------------------------------------------------------------------

/// Roll transactions up into the month containing `reference_date` and the
/// month before it, with growth rates between the two. Every transaction is
/// counted regardless of status. Totals saturate at `Decimal::MAX` rather
/// than overflow.
pub fn compute_metrics(transactions: &[Transaction], reference_date: NaiveDate) -> MetricsResult {
    compute_metrics_with(transactions, reference_date, &MetricsOptions::default())
}

/// [`compute_metrics`] with an explicit status filter.
pub fn compute_metrics_with(
    transactions: &[Transaction],
    reference_date: NaiveDate,
    options: &MetricsOptions,
) -> MetricsResult {
    let current_window = MonthWindow::containing(reference_date);
    let previous_window = current_window.previous();

    let counted = move || {
        transactions
            .iter()
            .filter(move |t| options.status_filter.includes(t.status))
    };
    let current: Vec<&Transaction> = counted()
        .filter(|t| current_window.contains(t.date))
        .collect();
    let previous: Vec<&Transaction> = counted()
        .filter(|t| previous_window.contains(t.date))
        .collect();

    debug!(
        %reference_date,
        current = current.len(),
        previous = previous.len(),
        total = transactions.len(),
        "partitioned transactions into month windows"
    );

    let current_totals = month_totals(&current);
    let last_month = month_totals(&previous);

    let expenses_by_category = expenses_by_category(&current);
    let marketing_expenses = expenses_by_category
        .get(MARKETING_CATEGORY)
        .copied()
        .unwrap_or(Decimal::ZERO);
    // (revenue - marketing) / marketing * 100 is the change from spend to revenue
    let marketing_roi = growth_pct(current_totals.revenue, marketing_expenses);

    let growth = GrowthRates {
        revenue: growth_pct(current_totals.revenue, last_month.revenue),
        customers: growth_pct(
            Decimal::from(current_totals.customer_count),
            Decimal::from(last_month.customer_count),
        ),
    };

    MetricsResult {
        period: ReportingPeriod {
            current: current_window,
            previous: previous_window,
        },
        current_month: CurrentMonthMetrics {
            revenue: current_totals.revenue,
            expenses: current_totals.expenses,
            profit: current_totals.profit,
            customer_count: current_totals.customer_count,
            average_order_value: average_order_value(&current),
            marketing_roi,
            marketing_expenses,
            revenue_by_category: revenue_by_category(&current),
            expenses_by_category,
        },
        last_month,
        growth,
    }
}

// ---------------------------------------------------------------------------
// Function 2: analyze_metrics
// ---------------------------------------------------------------------------

/// Enveloped metrics computation. Warnings name every figure that fell back
/// to zero because its denominator was empty.
pub fn analyze_metrics(input: &MetricsInput) -> BizDashResult<ComputationOutput<MetricsResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = compute_metrics_with(&input.transactions, input.reference_date, &input.options);

    let period = &result.period;
    let windowed: Vec<&Transaction> = input
        .transactions
        .iter()
        .filter(|t| period.current.contains(t.date) || period.previous.contains(t.date))
        .collect();
    let outside = input.transactions.len() - windowed.len();
    if outside > 0 {
        warnings.push(format!(
            "{} transaction(s) fall outside {} to {} and were ignored",
            outside, result.period.previous.start, result.period.current.end
        ));
    }

    if input.options.status_filter == StatusFilter::All {
        let unsettled = windowed
            .iter()
            .filter(|t| t.status != TransactionStatus::Completed)
            .count();
        if unsettled > 0 {
            warnings.push(format!(
                "{} pending or failed transaction(s) are counted as realised",
                unsettled
            ));
        }
    }

    if result.last_month.revenue.is_zero() {
        warn!("no prior-month revenue; revenue growth reported as 0");
        warnings.push("No revenue in the prior month; revenue growth reported as 0".to_string());
    }
    if result.last_month.customer_count == 0 {
        warnings.push("No customers in the prior month; customer growth reported as 0".to_string());
    }
    if result.current_month.marketing_expenses.is_zero() {
        warnings.push("No marketing spend this month; marketing ROI reported as 0".to_string());
    }

    let totals = [
        result.current_month.revenue,
        result.current_month.expenses,
        result.last_month.revenue,
        result.last_month.expenses,
    ];
    if totals.iter().any(|v| *v == Decimal::MAX || *v == Decimal::MIN) {
        warn!("monthly totals saturated at the decimal range");
        warnings.push(
            "Monthly totals exceeded the representable range and were capped".to_string(),
        );
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Month-over-month revenue, expense, customer and marketing rollup",
        &serde_json::json!({
            "reference_date": input.reference_date.to_string(),
            "status_filter": input.options.status_filter,
            "transactions": input.transactions.len(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
