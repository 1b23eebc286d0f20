use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BizDashError;
use crate::types::Money;
use crate::BizDashResult;

/// Service name that marks an income transaction as a product sale.
pub const RETAIL_SERVICE: &str = "Retail";

const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

/// Settlement status. Carried for display; aggregation ignores it unless
/// a status filter is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

/// Revenue bucket an income transaction reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueClass {
    Product,
    Service,
}

impl RevenueClass {
    /// Infer the class from a service name. Only the retail sentinel maps to
    /// product revenue.
    pub fn from_service(service: Option<&str>) -> Self {
        match service {
            Some(RETAIL_SERVICE) => RevenueClass::Product,
            _ => RevenueClass::Service,
        }
    }

    /// Category label used in revenue breakdowns.
    pub fn label(&self) -> &'static str {
        match self {
            RevenueClass::Product => "Product Sales",
            RevenueClass::Service => "Services",
        }
    }
}

/// A single income or expense event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    /// Income is positive. Expenses may be stored signed; only the magnitude is used.
    pub amount: Money,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_class: Option<RevenueClass>,
}

/// A transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_class: Option<RevenueClass>,
}

// ---------------------------------------------------------------------------
// Behaviour
// ---------------------------------------------------------------------------

impl Transaction {
    /// Assign a fresh id and fix the revenue class.
    pub fn from_new(new: NewTransaction) -> Self {
        Transaction {
            id: Uuid::new_v4().to_string(),
            date: new.date,
            description: new.description,
            amount: new.amount,
            transaction_type: new.transaction_type,
            category: new.category,
            status: new.status,
            client: new.client,
            service: new.service,
            event_id: new.event_id,
            revenue_class: new.revenue_class,
        }
        .tag_revenue_class()
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Magnitude of an expense, regardless of the sign it was stored with.
    pub fn expense_amount(&self) -> Money {
        self.amount.abs()
    }

    /// The explicit tag when present, otherwise inferred from the service name.
    pub fn revenue_class(&self) -> RevenueClass {
        self.revenue_class
            .unwrap_or_else(|| RevenueClass::from_service(self.service.as_deref()))
    }

    /// Fix the revenue class on income records so later reads never depend
    /// on the service name. Expenses are left untagged.
    pub fn tag_revenue_class(mut self) -> Self {
        if self.is_income() && self.revenue_class.is_none() {
            self.revenue_class = Some(RevenueClass::from_service(self.service.as_deref()));
        }
        self
    }

    /// Client name, if present and non-empty.
    pub fn client_name(&self) -> Option<&str> {
        self.client.as_deref().filter(|c| !c.is_empty())
    }

    /// Service name, if present and non-empty.
    pub fn service_name(&self) -> Option<&str> {
        self.service.as_deref().filter(|s| !s.is_empty())
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> BizDashResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| BizDashError::ParseError(format!("invalid date '{}': {}", raw, e)))
}

/// Parse a JSON array of transactions, tagging revenue classes on the way in.
pub fn parse_transactions(json: &str) -> BizDashResult<Vec<Transaction>> {
    let raw: Vec<Transaction> = serde_json::from_str(json)
        .map_err(|e| BizDashError::ParseError(format!("invalid transaction data: {}", e)))?;
    Ok(raw.into_iter().map(Transaction::tag_revenue_class).collect())
}

impl Default for NewTransaction {
    fn default() -> Self {
        NewTransaction {
            date: NaiveDate::default(),
            description: String::new(),
            amount: Decimal::ZERO,
            transaction_type: TransactionType::Income,
            category: String::new(),
            status: TransactionStatus::default(),
            client: None,
            service: None,
            event_id: None,
            revenue_class: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn income(service: Option<&str>) -> Transaction {
        Transaction {
            id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            description: String::new(),
            amount: dec!(45),
            transaction_type: TransactionType::Income,
            category: "Services".to_string(),
            status: TransactionStatus::Completed,
            client: Some("Sarah Johnson".to_string()),
            service: service.map(str::to_string),
            event_id: None,
            revenue_class: None,
        }
    }

    #[test]
    fn test_retail_service_infers_product_class() {
        assert_eq!(income(Some("Retail")).revenue_class(), RevenueClass::Product);
        assert_eq!(income(Some("Balayage")).revenue_class(), RevenueClass::Service);
        assert_eq!(income(None).revenue_class(), RevenueClass::Service);
    }

    #[test]
    fn test_explicit_tag_overrides_service_name() {
        let mut tx = income(Some("Retail"));
        tx.revenue_class = Some(RevenueClass::Service);
        assert_eq!(tx.revenue_class(), RevenueClass::Service);
    }

    #[test]
    fn test_tagging_skips_expenses() {
        let mut tx = income(Some("Retail"));
        tx.transaction_type = TransactionType::Expense;
        assert_eq!(tx.tag_revenue_class().revenue_class, None);
        assert_eq!(
            income(Some("Retail")).tag_revenue_class().revenue_class,
            Some(RevenueClass::Product)
        );
    }

    #[test]
    fn test_expense_amount_is_absolute() {
        let mut tx = income(None);
        tx.transaction_type = TransactionType::Expense;
        tx.amount = dec!(-300);
        assert_eq!(tx.expense_amount(), dec!(300));
    }

    #[test]
    fn test_from_new_assigns_unique_ids() {
        let new = NewTransaction {
            amount: dec!(120),
            service: Some("Retail".to_string()),
            ..NewTransaction::default()
        };
        let a = Transaction::from_new(new.clone());
        let b = Transaction::from_new(new);
        assert_ne!(a.id, b.id);
        assert_eq!(a.revenue_class, Some(RevenueClass::Product));
    }

    #[test]
    fn test_parse_date_rejects_malformed_input() {
        assert_eq!(
            parse_date("2025-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
        );
        match parse_date("15/03/2025") {
            Err(BizDashError::ParseError(msg)) => assert!(msg.contains("15/03/2025")),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_transactions_from_source_json() {
        let json = r#"[
            {"id": "2", "date": "2025-03-15", "description": "Shampoo", "amount": 45,
             "type": "income", "category": "Product Sales", "status": "completed",
             "client": "Sarah Johnson", "service": "Retail"},
            {"id": "3", "date": "2025-03-14", "amount": -300,
             "type": "expense", "category": "Supplies", "status": "pending"}
        ]"#;
        let txs = parse_transactions(json).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].revenue_class, Some(RevenueClass::Product));
        assert_eq!(txs[1].status, TransactionStatus::Pending);
        assert_eq!(txs[1].expense_amount(), dec!(300));
    }

    #[test]
    fn test_parse_transactions_bad_date_is_parse_error() {
        let json = r#"[{"id": "1", "date": "March 3rd", "amount": 1,
                        "type": "income", "category": "Services"}]"#;
        assert!(matches!(
            parse_transactions(json),
            Err(BizDashError::ParseError(_))
        ));
    }
}
