use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::{RevenueClass, Transaction};
use crate::types::Money;

/// Same-day figures for the front desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// All income booked on the day
    pub revenue: Money,
    /// Service income transactions on the day
    pub appointments: u32,
    /// Product income on the day
    pub product_sales: Money,
}

/// Revenue, appointment count and product sales for `date`. Status is
/// ignored, so pending bookings count as appointments.
pub fn daily_summary(transactions: &[Transaction], date: NaiveDate) -> DailySummary {
    let mut summary = DailySummary {
        date,
        revenue: Decimal::ZERO,
        appointments: 0,
        product_sales: Decimal::ZERO,
    };

    for t in transactions.iter().filter(|t| t.is_income() && t.date == date) {
        summary.revenue = summary.revenue.saturating_add(t.amount);
        match t.revenue_class() {
            RevenueClass::Product => {
                summary.product_sales = summary.product_sales.saturating_add(t.amount)
            }
            RevenueClass::Service => summary.appointments += 1,
        }
    }

    summary
}
