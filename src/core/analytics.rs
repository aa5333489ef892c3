use crate::core::{AnalyticsResult, CustomerStats, TransactionRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Computes the aggregate snapshot in a single pass over the records.
///
/// Total over any input: the empty slice yields a zeroed result with empty
/// groupings and no peak date. All sums use `Decimal` so repeated small
/// additions cannot drift.
pub fn analyze(records: &[TransactionRecord], top_n: usize) -> AnalyticsResult {
    let mut total_revenue = Decimal::ZERO;
    let mut region_totals: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut product_totals: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut customer_totals: BTreeMap<String, CustomerStats> = BTreeMap::new();
    let mut date_totals = BTreeMap::new();

    for record in records {
        total_revenue += record.amount;

        *region_totals.entry(record.region.clone()).or_default() += record.amount;
        *product_totals.entry(record.product_id.clone()).or_default() += record.amount;

        let stats = customer_totals.entry(record.customer_id.clone()).or_default();
        stats.orders += 1;
        stats.revenue += record.amount;

        *date_totals.entry(record.date).or_insert(Decimal::ZERO) += record.amount;
    }

    // BTreeMap iterates dates ascending; strict '>' keeps the earliest date
    // on revenue ties.
    let mut peak_date = None;
    let mut peak_revenue = Decimal::MIN;
    for (&date, &revenue) in &date_totals {
        if revenue > peak_revenue {
            peak_revenue = revenue;
            peak_date = Some(date);
        }
    }

    let (top_products, bottom_products) = rank_products(&product_totals, top_n);

    AnalyticsResult {
        total_revenue,
        region_totals,
        top_products,
        bottom_products,
        customer_totals,
        date_totals,
        peak_date,
    }
}

/// Ranks products by summed revenue, ties broken by product id ascending.
/// Returns at most `k` entries per list; fewer when fewer products exist.
fn rank_products(
    product_totals: &BTreeMap<String, Decimal>,
    k: usize,
) -> (Vec<(String, Decimal)>, Vec<(String, Decimal)>) {
    // BTreeMap order already breaks ties by product id ascending; a stable
    // sort on revenue alone preserves that.
    let mut ranked: Vec<(String, Decimal)> = product_totals
        .iter()
        .map(|(id, &revenue)| (id.clone(), revenue))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let top = ranked.iter().take(k).cloned().collect();

    ranked.sort_by(|a, b| a.1.cmp(&b.1));
    let bottom = ranked.iter().take(k).cloned().collect();

    (top, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(
        id: &str,
        customer: &str,
        product: &str,
        region: &str,
        amount: i64,
        date: &str,
    ) -> TransactionRecord {
        TransactionRecord {
            transaction_id: id.to_string(),
            customer_id: customer.to_string(),
            product_id: product.to_string(),
            region: region.to_string(),
            amount: Decimal::from(amount),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            record("T001", "C001", "P001", "East", 100, "2024-01-01"),
            record("T002", "C002", "P002", "West", 50, "2024-01-01"),
            record("T003", "C001", "P001", "East", 25, "2024-01-02"),
            record("T004", "C003", "P003", "North", 75, "2024-01-03"),
        ]
    }

    #[test]
    fn test_total_revenue_matches_naive_sum() {
        let records = sample();
        let naive: Decimal = records.iter().map(|r| r.amount).sum();
        let result = analyze(&records, 5);
        assert_eq!(result.total_revenue, naive);
        assert_eq!(result.total_revenue, Decimal::from(250));
    }

    #[test]
    fn test_group_subtotals_sum_to_total() {
        let result = analyze(&sample(), 5);
        let total = result.total_revenue;

        let regions: Decimal = result.region_totals.values().copied().sum();
        assert_eq!(regions, total);

        let customers: Decimal = result.customer_totals.values().map(|s| s.revenue).sum();
        assert_eq!(customers, total);

        let dates: Decimal = result.date_totals.values().copied().sum();
        assert_eq!(dates, total);

        let products: Decimal = result.top_products.iter().map(|(_, r)| *r).sum();
        assert_eq!(products, total);
    }

    #[test]
    fn test_region_totals() {
        let result = analyze(&sample(), 5);
        assert_eq!(result.region_totals["East"], Decimal::from(125));
        assert_eq!(result.region_totals["West"], Decimal::from(50));
        assert_eq!(result.region_totals["North"], Decimal::from(75));
    }

    #[test]
    fn test_top_and_bottom_products() {
        let result = analyze(&sample(), 2);
        assert_eq!(
            result.top_products,
            vec![
                ("P001".to_string(), Decimal::from(125)),
                ("P003".to_string(), Decimal::from(75)),
            ]
        );
        assert_eq!(
            result.bottom_products,
            vec![
                ("P002".to_string(), Decimal::from(50)),
                ("P003".to_string(), Decimal::from(75)),
            ]
        );
    }

    #[test]
    fn test_fewer_products_than_k_returns_all() {
        let result = analyze(&sample(), 10);
        assert_eq!(result.top_products.len(), 3);
        assert_eq!(result.bottom_products.len(), 3);
    }

    #[test]
    fn test_revenue_ties_ordered_by_product_id() {
        let records = vec![
            record("T001", "C001", "P200", "East", 100, "2024-01-01"),
            record("T002", "C001", "P100", "East", 100, "2024-01-01"),
        ];
        let result = analyze(&records, 5);
        assert_eq!(result.top_products[0].0, "P100");
        assert_eq!(result.top_products[1].0, "P200");
        assert_eq!(result.bottom_products[0].0, "P100");
    }

    #[test]
    fn test_customer_behavior() {
        let result = analyze(&sample(), 5);
        let c1 = &result.customer_totals["C001"];
        assert_eq!(c1.orders, 2);
        assert_eq!(c1.revenue, Decimal::from(125));
        let c3 = &result.customer_totals["C003"];
        assert_eq!(c3.orders, 1);
    }

    #[test]
    fn test_peak_date() {
        let result = analyze(&sample(), 5);
        // 2024-01-01 sums to 150, the largest daily total
        assert_eq!(
            result.peak_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
    }

    #[test]
    fn test_peak_date_tie_takes_earliest() {
        let records = vec![
            record("T001", "C001", "P001", "East", 100, "2024-01-05"),
            record("T002", "C001", "P001", "East", 100, "2024-01-02"),
        ];
        let result = analyze(&records, 5);
        assert_eq!(
            result.peak_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        );
    }

    #[test]
    fn test_empty_input_yields_zero_result() {
        let result = analyze(&[], 5);
        assert_eq!(result.total_revenue, Decimal::ZERO);
        assert!(result.region_totals.is_empty());
        assert!(result.top_products.is_empty());
        assert!(result.bottom_products.is_empty());
        assert!(result.customer_totals.is_empty());
        assert!(result.date_totals.is_empty());
        assert_eq!(result.peak_date, None);
    }
}
