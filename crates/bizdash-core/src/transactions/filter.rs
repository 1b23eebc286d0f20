use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::model::{Transaction, TransactionStatus, TransactionType};

/// Criteria for narrowing a transaction list. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    /// Only the last N days, ending on the reference date inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub within_days: Option<u32>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction, reference_date: NaiveDate) -> bool {
        if self.transaction_type.is_some_and(|ty| ty != t.transaction_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != t.status) {
            return false;
        }
        if let Some(category) = &self.category {
            if !t.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(days) = self.within_days {
            let from = reference_date
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN);
            if t.date <= from || t.date > reference_date {
                return false;
            }
        }
        true
    }
}

/// Transactions matching `filter`, newest first.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
    reference_date: NaiveDate,
) -> Vec<&'a Transaction> {
    let mut matched: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t, reference_date))
        .collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date));
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn tx(id: &str, day: u32, ty: TransactionType, category: &str, status: TransactionStatus) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: d(day),
            description: String::new(),
            amount: dec!(10),
            transaction_type: ty,
            category: category.to_string(),
            status,
            client: None,
            service: None,
            event_id: None,
            revenue_class: None,
        }
    }

    fn ledger() -> Vec<Transaction> {
        use TransactionStatus::{Completed, Pending};
        use TransactionType::{Expense, Income};
        vec![
            tx("1", 1, Income, "Services", Completed),
            tx("2", 10, Expense, "Rent", Completed),
            tx("3", 14, Income, "Product Sales", Pending),
            tx("4", 20, Income, "Services", Pending),
        ]
    }

    fn ids(matched: &[&Transaction]) -> Vec<String> {
        matched.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything_newest_first() {
        let txs = ledger();
        let matched = filter_transactions(&txs, &TransactionFilter::default(), d(20));
        assert_eq!(ids(&matched), vec!["4", "3", "2", "1"]);
    }

    #[test]
    fn test_type_category_and_status() {
        let txs = ledger();
        let filter = TransactionFilter {
            transaction_type: Some(TransactionType::Income),
            category: Some("services".to_string()),
            status: Some(TransactionStatus::Pending),
            within_days: None,
        };
        assert_eq!(ids(&filter_transactions(&txs, &filter, d(20))), vec!["4"]);
    }

    #[test]
    fn test_within_days_ends_on_reference_date() {
        let txs = ledger();
        let filter = TransactionFilter {
            within_days: Some(7),
            ..Default::default()
        };
        // (13, 20] then (8, 15]
        assert_eq!(ids(&filter_transactions(&txs, &filter, d(20))), vec!["4", "3"]);
        assert_eq!(ids(&filter_transactions(&txs, &filter, d(15))), vec!["3", "2"]);
    }

    #[test]
    fn test_deserializes_type_key() {
        let filter: TransactionFilter =
            serde_json::from_str(r#"{"type": "expense", "within_days": 30}"#).unwrap();
        assert_eq!(filter.transaction_type, Some(TransactionType::Expense));
        assert_eq!(filter.within_days, Some(30));
    }
}
