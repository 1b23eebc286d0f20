use bizdash_core::analytics::{
    analyze_customers, analyze_metrics, compute_metrics, compute_metrics_with,
    customer_summaries, daily_summary, format_currency, format_percentage, CustomerStatus,
    CustomersInput, MetricsInput, MetricsOptions, StatusFilter,
};
use bizdash_core::dashboard::fixtures::sample_transactions;
use bizdash_core::transactions::{
    filter_transactions, parse_transactions, Transaction, TransactionFilter, TransactionStatus,
    TransactionType,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn march_20() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
}

// ===========================================================================
// Sample salon month
// ===========================================================================

#[test]
fn test_sample_month_totals() {
    let m = compute_metrics(&sample_transactions(), march_20());
    let cur = &m.current_month;

    assert_eq!(cur.revenue, dec!(1395));
    assert_eq!(cur.expenses, dec!(1950));
    assert_eq!(cur.profit, dec!(-555));
    // Sarah, Emily, Michael, Rachel, Lisa, Jessica, Amy
    assert_eq!(cur.customer_count, 7);
    // 1145 / 7 service orders
    assert_eq!(cur.average_order_value, dec!(1145) / dec!(7));
    assert_eq!(cur.marketing_expenses, dec!(100));
    assert_eq!(cur.marketing_roi, dec!(1295));
}

#[test]
fn test_sample_month_breakdowns() {
    let m = compute_metrics(&sample_transactions(), march_20());
    let cur = &m.current_month;

    assert_eq!(cur.revenue_by_category.len(), 2);
    assert_eq!(cur.revenue_by_category["Product Sales"], dec!(250));
    assert_eq!(cur.revenue_by_category["Services"], dec!(1145));

    let expected: Vec<(&str, Decimal)> = vec![
        ("Equipment", dec!(400)),
        ("Insurance", dec!(200)),
        ("Inventory", dec!(500)),
        ("Marketing", dec!(100)),
        ("Supplies", dec!(300)),
        ("Training", dec!(150)),
        ("Utilities", dec!(300)),
    ];
    let actual: Vec<(&str, Decimal)> = cur
        .expenses_by_category
        .iter()
        .map(|(k, v)| (k.as_str(), *v))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_sample_prior_month_is_empty() {
    let m = compute_metrics(&sample_transactions(), march_20());
    assert_eq!(m.last_month.revenue, Decimal::ZERO);
    assert_eq!(m.last_month.customer_count, 0);
    assert_eq!(m.growth.revenue, Decimal::ZERO);
    assert_eq!(m.growth.customers, Decimal::ZERO);
}

#[test]
fn test_sample_seen_from_april_is_prior_month() {
    let april = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
    let m = compute_metrics(&sample_transactions(), april);
    assert_eq!(m.current_month.revenue, Decimal::ZERO);
    assert_eq!(m.last_month.revenue, dec!(1395));
    assert_eq!(m.last_month.expenses, dec!(1950));
    assert_eq!(m.last_month.customer_count, 7);
    // Dropping from 1395 to 0 is a 100% decline.
    assert_eq!(m.growth.revenue, dec!(-100));
}

#[test]
fn test_sample_completed_only() {
    let opts = MetricsOptions {
        status_filter: StatusFilter::CompletedOnly,
    };
    let m = compute_metrics_with(&sample_transactions(), march_20(), &opts);
    // 1395 less four pending appointments (180 + 120 + 150 + 300)
    assert_eq!(m.current_month.revenue, dec!(645));
    assert_eq!(m.current_month.customer_count, 4);
    assert_eq!(m.current_month.expenses, dec!(1950));
}

// ===========================================================================
// Invariants
// ===========================================================================

#[test]
fn test_profit_identity_and_category_sums() {
    let mut txs = sample_transactions();
    // Spread a few into February so both windows are populated.
    for t in txs.iter_mut().filter(|t| t.id.parse::<u32>().unwrap_or(0) % 3 == 0) {
        t.date = NaiveDate::from_ymd_opt(2025, 2, 27).unwrap();
    }
    let m = compute_metrics(&txs, march_20());

    assert_eq!(
        m.current_month.revenue - m.current_month.expenses,
        m.current_month.profit
    );
    assert_eq!(m.last_month.revenue - m.last_month.expenses, m.last_month.profit);

    let revenue_sum: Decimal = m.current_month.revenue_by_category.values().copied().sum();
    assert_eq!(revenue_sum, m.current_month.revenue);
    let expense_sum: Decimal = m.current_month.expenses_by_category.values().copied().sum();
    assert_eq!(expense_sum, m.current_month.expenses);
}

#[test]
fn test_duplicate_client_transactions_do_not_inflate_customers() {
    let txs = sample_transactions();
    let mut doubled: Vec<Transaction> = txs.clone();
    doubled.extend(txs.iter().filter(|t| t.is_income()).cloned().map(|mut t| {
        t.id = format!("{}-dup", t.id);
        t
    }));
    let once = compute_metrics(&txs, march_20());
    let twice = compute_metrics(&doubled, march_20());
    assert_eq!(once.current_month.customer_count, twice.current_month.customer_count);
    assert_eq!(twice.current_month.revenue, once.current_month.revenue * dec!(2));
}

#[test]
fn test_order_does_not_matter() {
    let txs = sample_transactions();
    let mut reversed = txs.clone();
    reversed.reverse();
    assert_eq!(
        compute_metrics(&txs, march_20()),
        compute_metrics(&reversed, march_20())
    );
}

// ===========================================================================
// Envelope and JSON boundary
// ===========================================================================

#[test]
fn test_analyze_metrics_from_json_input() {
    let json = r#"{
        "reference_date": "2025-03-31",
        "transactions": [
            {"id": "a", "date": "2025-03-02", "amount": 100, "type": "income",
             "category": "Services", "client": "A", "service": "Cut"},
            {"id": "b", "date": "2025-03-03", "amount": -40, "type": "expense",
             "category": "Supplies"},
            {"id": "c", "date": "2025-02-14", "amount": 80, "type": "income",
             "category": "Services", "client": "B", "service": "Cut"}
        ]
    }"#;
    let input: MetricsInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.options.status_filter, StatusFilter::All);

    let out = analyze_metrics(&input).unwrap();
    let m = &out.result;
    assert_eq!(m.current_month.profit, dec!(60));
    assert_eq!(m.last_month.revenue, dec!(80));
    // (100 - 80) / 80 * 100
    assert_eq!(m.growth.revenue, dec!(25));
    assert_eq!(m.growth.customers, Decimal::ZERO);
    assert_eq!(m.period.previous.start, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    assert!(out.warnings.iter().any(|w| w.contains("marketing ROI")));
    assert!(!out.warnings.iter().any(|w| w.contains("revenue growth")));
}

#[test]
fn test_parsed_transactions_feed_metrics() {
    let json = r#"[
        {"id": "1", "date": "2025-03-15", "amount": 45, "type": "income",
         "category": "Product Sales", "client": "S", "service": "Retail"}
    ]"#;
    let txs = parse_transactions(json).unwrap();
    let m = compute_metrics(&txs, march_20());
    assert_eq!(m.current_month.revenue_by_category["Product Sales"], dec!(45));
    assert_eq!(m.current_month.average_order_value, Decimal::ZERO);
}

#[test]
fn test_formatting_of_sample_figures() {
    let m = compute_metrics(&sample_transactions(), march_20());
    assert_eq!(format_currency(m.current_month.revenue), "$1,395");
    assert_eq!(format_currency(m.current_month.profit), "-$555");
    assert_eq!(format_currency(m.current_month.average_order_value), "$164");
    assert_eq!(format_percentage(m.current_month.marketing_roi), "1295.0%");
}

// ===========================================================================
// Customer rollup
// ===========================================================================

fn on(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

#[test]
fn test_sample_customers_ranked_by_spend() {
    let customers = customer_summaries(&sample_transactions(), march_20());
    let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Amy Chen",
            "Emily Davis",
            "Lisa Wong",
            "Sarah Johnson",
            "Rachel Green",
            "Jessica Smith",
            "Michael Brown",
        ]
    );
    assert!(customers.iter().all(|c| c.status == CustomerStatus::Active));
}

#[test]
fn test_sample_customer_detail() {
    let customers = customer_summaries(&sample_transactions(), march_20());
    let sarah = customers
        .iter()
        .find(|c| c.id == "sarah-johnson")
        .expect("Sarah is a customer");
    assert_eq!(sarah.total_spent, dec!(195));
    assert_eq!(sarah.visit_count, 2);
    assert_eq!(sarah.average_spend, dec!(97.5));
    assert_eq!(sarah.last_visit, on(3, 15));
    assert_eq!(sarah.services, vec!["Cut & Color".to_string(), "Retail".to_string()]);
}

#[test]
fn test_sample_customers_go_inactive_after_three_months() {
    let active = |reference: NaiveDate| -> Vec<String> {
        customer_summaries(&sample_transactions(), reference)
            .into_iter()
            .filter(|c| c.status == CustomerStatus::Active)
            .map(|c| c.name)
            .collect()
    };
    // Lisa's last visit is 18 March: still active on 17 June, inactive on 18 June
    assert!(active(on(6, 17)).contains(&"Lisa Wong".to_string()));
    assert!(!active(on(6, 18)).contains(&"Lisa Wong".to_string()));
    assert_eq!(
        active(on(6, 18)),
        vec!["Amy Chen".to_string(), "Jessica Smith".to_string()]
    );
    assert!(active(on(6, 19)).is_empty());
}

#[test]
fn test_analyze_customers_envelope() {
    let out = analyze_customers(&CustomersInput {
        transactions: sample_transactions(),
        reference_date: march_20(),
    })
    .unwrap();
    assert_eq!(out.result.len(), 7);
    assert!(out.warnings.is_empty());
}

// ===========================================================================
// Same-day view
// ===========================================================================

#[test]
fn test_sample_daily_summary() {
    let txs = sample_transactions();
    let s = daily_summary(&txs, on(3, 15));
    // Cut & Color 150 plus retail 45 and 85
    assert_eq!(s.revenue, dec!(280));
    assert_eq!(s.appointments, 1);
    assert_eq!(s.product_sales, dec!(130));

    let s = daily_summary(&txs, on(3, 19));
    assert_eq!(s.revenue, dec!(450));
    assert_eq!(s.appointments, 2);
    assert_eq!(s.product_sales, Decimal::ZERO);
}

#[test]
fn test_sample_pending_income_this_week() {
    let txs = sample_transactions();
    let filter = TransactionFilter {
        transaction_type: Some(TransactionType::Income),
        status: Some(TransactionStatus::Pending),
        within_days: Some(7),
        ..Default::default()
    };
    let ids: Vec<&str> = filter_transactions(&txs, &filter, march_20())
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["12", "13", "11", "9"]);
}
