//! Transaction records and the calendar-month windows they are grouped into.

pub mod filter;
pub mod model;
pub mod window;

pub use filter::{filter_transactions, TransactionFilter};
pub use model::{
    parse_date, parse_transactions, NewTransaction, RevenueClass, Transaction,
    TransactionStatus, TransactionType, RETAIL_SERVICE,
};
pub use window::MonthWindow;
