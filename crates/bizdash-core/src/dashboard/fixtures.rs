//! Sample salon data used for demos and tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::state::{
    BusinessMetrics, BusinessProfile, BusinessSize, CompetitorBenchmark, CostBreakdown, Location,
    MarketingMetrics,
};
use crate::transactions::{Transaction, TransactionStatus, TransactionType, RETAIL_SERVICE};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn income(
    id: &str,
    day: u32,
    description: &str,
    amount: Decimal,
    status: TransactionStatus,
    client: &str,
    service: &str,
    event_id: Option<&str>,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date(day),
        description: description.to_string(),
        amount,
        transaction_type: TransactionType::Income,
        category: if service == RETAIL_SERVICE {
            "Product Sales".to_string()
        } else {
            "Services".to_string()
        },
        status,
        client: Some(client.to_string()),
        service: Some(service.to_string()),
        event_id: event_id.map(str::to_string),
        revenue_class: None,
    }
    .tag_revenue_class()
}

fn expense(id: &str, day: u32, description: &str, amount: Decimal, category: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date(day),
        description: description.to_string(),
        amount,
        transaction_type: TransactionType::Expense,
        category: category.to_string(),
        status: TransactionStatus::Completed,
        client: None,
        service: None,
        event_id: None,
        revenue_class: None,
    }
}

/// Eighteen salon transactions from the first three weeks of March 2025.
pub fn sample_transactions() -> Vec<Transaction> {
    use TransactionStatus::{Completed, Pending};

    vec![
        income("1", 15, "Haircut and Color Service", dec!(150), Completed, "Sarah Johnson", "Cut & Color", Some("1")),
        income("2", 15, "Hair Product Sale - Shampoo", dec!(45), Completed, "Sarah Johnson", "Retail", None),
        expense("3", 14, "Hair Color Supplies Restock", dec!(-300), "Supplies"),
        income("4", 14, "Balayage Service", dec!(200), Completed, "Emily Davis", "Balayage", Some("3")),
        expense("5", 13, "Salon Chair Maintenance", dec!(-150), "Equipment"),
        expense("6", 13, "Styling Tools Purchase", dec!(-250), "Equipment"),
        income("7", 12, "Men's Haircut", dec!(45), Completed, "Michael Brown", "Men's Cut", Some("5")),
        expense("8", 12, "Hair Products Inventory", dec!(-500), "Inventory"),
        income("9", 16, "Upcoming Full Service Appointment", dec!(180), Pending, "Rachel Green", "Cut, Color & Style", Some("7")),
        expense("10", 11, "Marketing - Social Media Ads", dec!(-100), "Marketing"),
        income("11", 17, "Deep Conditioning Treatment", dec!(120), Pending, "Lisa Wong", "Treatment", Some("8")),
        income("12", 19, "Bridal Trial Appointment", dec!(150), Pending, "Jessica Smith", "Bridal", Some("10")),
        income("13", 19, "Color Correction Service", dec!(300), Pending, "Amy Chen", "Color Correction", Some("11")),
        income("14", 15, "Hair Products Sale - Styling Products", dec!(85), Completed, "Emily Davis", "Retail", None),
        expense("15", 16, "Salon Insurance Monthly Payment", dec!(-200), "Insurance"),
        expense("16", 17, "Staff Training Materials", dec!(-150), "Training"),
        expense("17", 18, "Utilities Payment", dec!(-300), "Utilities"),
        income("18", 18, "Hair Products Sale - Treatment Kit", dec!(120), Completed, "Lisa Wong", "Retail", None),
    ]
}

pub fn sample_profile() -> BusinessProfile {
    BusinessProfile {
        id: "1".to_string(),
        name: "Sample Business".to_string(),
        industry: "Retail".to_string(),
        size: BusinessSize::Small,
        monthly_revenue: dec!(50000),
        employee_count: 10,
        founded_year: 2020,
        location: Location {
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            country: "USA".to_string(),
        },
    }
}

pub fn sample_metrics() -> BusinessMetrics {
    BusinessMetrics {
        revenue: dec!(50000),
        costs: CostBreakdown {
            fixed: dec!(20000),
            variable: dec!(15000),
        },
        profit: dec!(15000),
        customer_count: 500,
        average_order_value: dec!(100),
    }
}

pub fn sample_marketing() -> MarketingMetrics {
    MarketingMetrics {
        campaign_roi: dec!(150),
        ad_spend: dec!(5000),
        conversions: 100,
        customer_acquisition_cost: dec!(50),
    }
}

pub fn sample_benchmarks() -> CompetitorBenchmark {
    CompetitorBenchmark {
        average_price: dec!(95),
        market_share: dec!(15),
        customer_satisfaction: dec!(4.2),
        growth_rate: dec!(12),
    }
}
