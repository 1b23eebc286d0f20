pub mod customers;
pub mod daily;
pub mod format;
pub mod monthly;

pub use customers::{
    analyze_customers, customer_summaries, CustomerStatus, CustomerSummary, CustomersInput,
};
pub use daily::{daily_summary, DailySummary};
pub use format::{format_currency, format_percentage};
pub use monthly::{
    analyze_metrics, compute_metrics, compute_metrics_with, MetricsInput, MetricsOptions,
    MetricsResult, StatusFilter,
};
