use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BizDashError;
use crate::transactions::Transaction;
use crate::types::{Money, Percent};
use crate::BizDashResult;

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub fixed: Money,
    pub variable: Money,
}

/// Headline figures shown on the overview page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessMetrics {
    pub revenue: Money,
    pub costs: CostBreakdown,
    pub profit: Money,
    pub customer_count: u32,
    pub average_order_value: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketingMetrics {
    pub campaign_roi: Percent,
    pub ad_spend: Money,
    pub conversions: u32,
    pub customer_acquisition_cost: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorBenchmark {
    pub average_price: Money,
    pub market_share: Percent,
    /// Out of 5
    pub customer_satisfaction: Decimal,
    pub growth_rate: Percent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessSize {
    Micro,
    #[default]
    Small,
    Medium,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub size: BusinessSize,
    pub monthly_revenue: Money,
    pub employee_count: u32,
    pub founded_year: i32,
    pub location: Location,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        BusinessProfile {
            id: String::new(),
            name: String::new(),
            industry: String::new(),
            size: BusinessSize::default(),
            monthly_revenue: Decimal::ZERO,
            employee_count: 0,
            founded_year: Utc::now().year(),
            location: Location::default(),
        }
    }
}

/// Everything the dashboard renders from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessState {
    pub metrics: BusinessMetrics,
    pub marketing: MarketingMetrics,
    pub benchmarks: CompetitorBenchmark,
    pub profile: BusinessProfile,
    pub transactions: Vec<Transaction>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum BusinessAction {
    SetMetrics(BusinessMetrics),
    SetMarketing(MarketingMetrics),
    SetBenchmarks(CompetitorBenchmark),
    SetProfile(BusinessProfile),
    SetTransactions(Vec<Transaction>),
    AddTransaction(Transaction),
    UpdateTransaction { id: String, transaction: Transaction },
    DeleteTransaction(String),
    SetLoading(bool),
    SetError(Option<String>),
}

// ---------------------------------------------------------------------------
// Reducers
// ---------------------------------------------------------------------------

/// Apply `action` to `state`. Updates and deletes that name an unknown id
/// leave the transaction list untouched.
pub fn reduce(state: BusinessState, action: BusinessAction) -> BusinessState {
    match action {
        BusinessAction::SetMetrics(metrics) => BusinessState { metrics, ..state },
        BusinessAction::SetMarketing(marketing) => BusinessState { marketing, ..state },
        BusinessAction::SetBenchmarks(benchmarks) => BusinessState { benchmarks, ..state },
        BusinessAction::SetProfile(profile) => BusinessState { profile, ..state },
        BusinessAction::SetTransactions(transactions) => BusinessState {
            transactions: transactions
                .into_iter()
                .map(Transaction::tag_revenue_class)
                .collect(),
            ..state
        },
        BusinessAction::AddTransaction(transaction) => {
            let mut transactions = state.transactions;
            transactions.push(transaction.tag_revenue_class());
            BusinessState {
                transactions,
                ..state
            }
        }
        BusinessAction::UpdateTransaction { id, transaction } => {
            let transaction = transaction.tag_revenue_class();
            let transactions = state
                .transactions
                .into_iter()
                .map(|t| if t.id == id { transaction.clone() } else { t })
                .collect();
            BusinessState {
                transactions,
                ..state
            }
        }
        BusinessAction::DeleteTransaction(id) => {
            let transactions = state
                .transactions
                .into_iter()
                .filter(|t| t.id != id)
                .collect();
            BusinessState {
                transactions,
                ..state
            }
        }
        BusinessAction::SetLoading(is_loading) => BusinessState { is_loading, ..state },
        BusinessAction::SetError(error) => BusinessState { error, ..state },
    }
}

/// Like [`reduce`], but updates and deletes of an unknown id are errors.
pub fn try_reduce(state: BusinessState, action: BusinessAction) -> BizDashResult<BusinessState> {
    let target = match &action {
        BusinessAction::UpdateTransaction { id, .. } => Some(id),
        BusinessAction::DeleteTransaction(id) => Some(id),
        _ => None,
    };
    if let Some(id) = target {
        if !state.transactions.iter().any(|t| &t.id == id) {
            return Err(BizDashError::TransactionNotFound(id.clone()));
        }
    }
    Ok(reduce(state, action))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::{RevenueClass, TransactionStatus, TransactionType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(id: &str, amount: Decimal) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            description: "Cut".to_string(),
            amount,
            transaction_type: TransactionType::Income,
            category: "Services".to_string(),
            status: TransactionStatus::Completed,
            client: Some("Sarah Johnson".to_string()),
            service: Some("Retail".to_string()),
            event_id: None,
            revenue_class: None,
        }
    }

    #[test]
    fn test_default_state_is_empty() {
        let state = BusinessState::default();
        assert!(state.transactions.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.profile.size, BusinessSize::Small);
        assert_eq!(state.profile.founded_year, Utc::now().year());
    }

    #[test]
    fn test_add_update_delete() {
        let state = reduce(BusinessState::default(), BusinessAction::AddTransaction(tx("1", dec!(45))));
        let state = reduce(state, BusinessAction::AddTransaction(tx("2", dec!(60))));
        assert_eq!(state.transactions.len(), 2);
        assert_eq!(state.transactions[0].revenue_class, Some(RevenueClass::Product));

        let state = reduce(
            state,
            BusinessAction::UpdateTransaction {
                id: "1".to_string(),
                transaction: tx("1", dec!(50)),
            },
        );
        assert_eq!(state.transactions[0].amount, dec!(50));
        assert_eq!(state.transactions[1].amount, dec!(60));

        let state = reduce(state, BusinessAction::DeleteTransaction("1".to_string()));
        assert_eq!(state.transactions.len(), 1);
        assert_eq!(state.transactions[0].id, "2");
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let before = reduce(BusinessState::default(), BusinessAction::AddTransaction(tx("1", dec!(45))));
        let after = reduce(before.clone(), BusinessAction::SetLoading(true));
        assert!(!before.is_loading);
        assert!(after.is_loading);
        assert_eq!(before.transactions, after.transactions);
    }

    #[test]
    fn test_unknown_id_is_noop_for_reduce_and_error_for_try_reduce() {
        let state = reduce(BusinessState::default(), BusinessAction::AddTransaction(tx("1", dec!(45))));
        let same = reduce(state.clone(), BusinessAction::DeleteTransaction("missing".to_string()));
        assert_eq!(same, state);

        match try_reduce(state.clone(), BusinessAction::DeleteTransaction("missing".to_string())) {
            Err(BizDashError::TransactionNotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("Expected TransactionNotFound, got {:?}", other),
        }
        let updated = try_reduce(
            state,
            BusinessAction::UpdateTransaction {
                id: "1".to_string(),
                transaction: tx("1", dec!(99)),
            },
        )
        .unwrap();
        assert_eq!(updated.transactions[0].amount, dec!(99));
    }

    #[test]
    fn test_set_error_and_clear() {
        let state = reduce(
            BusinessState::default(),
            BusinessAction::SetError(Some("boom".to_string())),
        );
        assert_eq!(state.error.as_deref(), Some("boom"));
        let state = reduce(state, BusinessAction::SetError(None));
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_action_json_shape() {
        let action: BusinessAction =
            serde_json::from_str(r#"{"type": "set_loading", "payload": true}"#).unwrap();
        assert_eq!(action, BusinessAction::SetLoading(true));
        let action: BusinessAction =
            serde_json::from_str(r#"{"type": "delete_transaction", "payload": "7"}"#).unwrap();
        assert_eq!(action, BusinessAction::DeleteTransaction("7".to_string()));
    }
}
