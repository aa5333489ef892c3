use crate::core::{AnalyticsResult, RunSummary};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Renders the analytics snapshot as a human-readable text report.
///
/// Output is fully deterministic: every section iterates either a
/// `BTreeMap` or a pre-ranked list.
pub fn render(analytics: &AnalyticsResult, summary: &RunSummary, top_n: usize) -> String {
    let mut out = String::new();

    section(&mut out, "SALES ANALYTICS REPORT");

    let _ = writeln!(out, "Rows read:           {}", summary.clean.total_rows);
    let _ = writeln!(out, "Valid records:       {}", summary.clean.valid);
    let _ = writeln!(out, "Rejected rows:       {}", summary.clean.rejected);
    for (reason, count) in &summary.clean.reject_counts {
        let _ = writeln!(out, "  - {}: {}", reason, count);
    }
    if summary.clean.duplicates_dropped > 0 {
        let _ = writeln!(
            out,
            "Duplicates dropped:  {}",
            summary.clean.duplicates_dropped
        );
    }
    let _ = writeln!(out, "Records analyzed:    {}", summary.analyzed);
    let _ = writeln!(out, "Enrichment misses:   {}", summary.enrichment_misses);

    section(&mut out, "TOTAL REVENUE");
    let _ = writeln!(out, "{}", analytics.total_revenue);

    section(&mut out, "REVENUE BY REGION");
    for (region, revenue) in ranked_regions(analytics) {
        let _ = writeln!(out, "{:<12} {}", region, revenue);
    }

    section(&mut out, &format!("TOP {} PRODUCTS BY REVENUE", top_n));
    for (product, revenue) in &analytics.top_products {
        let _ = writeln!(out, "{:<12} {}", product, revenue);
    }

    section(&mut out, &format!("BOTTOM {} PRODUCTS BY REVENUE", top_n));
    for (product, revenue) in &analytics.bottom_products {
        let _ = writeln!(out, "{:<12} {}", product, revenue);
    }

    section(&mut out, "CUSTOMER BEHAVIOR");
    for (customer, stats) in &analytics.customer_totals {
        let _ = writeln!(
            out,
            "{:<12} {} transactions, revenue {}",
            customer, stats.orders, stats.revenue
        );
    }

    section(&mut out, "DAILY REVENUE");
    for (date, revenue) in &analytics.date_totals {
        let _ = writeln!(out, "{}   {}", date, revenue);
    }

    section(&mut out, "PEAK DAY");
    match analytics.peak_date {
        Some(date) => {
            let revenue = analytics.date_totals.get(&date).copied().unwrap_or_default();
            let _ = writeln!(out, "{} (revenue {})", date, revenue);
        }
        None => {
            let _ = writeln!(out, "No data");
        }
    }

    out
}

/// Regions ordered by revenue descending, ties by region name ascending.
fn ranked_regions(analytics: &AnalyticsResult) -> Vec<(&str, Decimal)> {
    let mut regions: Vec<(&str, Decimal)> = analytics
        .region_totals
        .iter()
        .map(|(region, &revenue)| (region.as_str(), revenue))
        .collect();
    regions.sort_by(|a, b| b.1.cmp(&a.1));
    regions
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.len()));
}
