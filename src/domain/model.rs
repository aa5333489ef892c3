use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One raw input line, pre-split on the delimiter but not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source file (header included).
    pub line: u64,
    pub fields: Vec<String>,
}

/// A validated sales transaction. Immutable once constructed by the cleaner.
///
/// Invariants enforced at construction: all identifier fields are non-empty
/// after trimming, `amount >= 0`, `date` is a real calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub customer_id: String,
    pub product_id: String,
    pub region: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Product metadata returned by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMeta {
    pub category: String,
    pub brand: String,
    pub rating: f64,
}

/// A transaction joined with its catalog metadata.
///
/// `meta` is `None` when the catalog had no entry for the product or the
/// lookup failed; the exporter writes the `Unknown` marker in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: TransactionRecord,
    pub meta: Option<ProductMeta>,
}

/// Per-customer aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CustomerStats {
    pub orders: u64,
    pub revenue: Decimal,
}

/// Aggregate snapshot computed in one pass over the filtered record set.
///
/// All groupings are `BTreeMap` so iteration order, and therefore the
/// rendered report, is deterministic across runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyticsResult {
    pub total_revenue: Decimal,
    pub region_totals: BTreeMap<String, Decimal>,
    /// Products ranked by summed revenue descending, ties by id ascending.
    pub top_products: Vec<(String, Decimal)>,
    /// Products ranked by summed revenue ascending, ties by id ascending.
    pub bottom_products: Vec<(String, Decimal)>,
    pub customer_totals: BTreeMap<String, CustomerStats>,
    pub date_totals: BTreeMap<NaiveDate, Decimal>,
    pub peak_date: Option<NaiveDate>,
}

/// Why a raw row was rejected by the cleaner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectReason {
    FieldCount,
    BadAmount,
    BadDate,
    EmptyField,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RejectReason::FieldCount => "wrong field count",
            RejectReason::BadAmount => "invalid or negative amount",
            RejectReason::BadDate => "invalid date",
            RejectReason::EmptyField => "empty identifier field",
        };
        f.write_str(label)
    }
}

/// Counters produced by the cleaning stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub total_rows: u64,
    pub valid: u64,
    pub rejected: u64,
    pub duplicates_dropped: u64,
    pub reject_counts: BTreeMap<RejectReason, u64>,
}

/// Everything the cleaning stage hands downstream.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub records: Vec<TransactionRecord>,
    pub rejected: Vec<(RawRow, RejectReason)>,
    pub summary: CleanSummary,
}

/// Full-run counters surfaced in the report.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub clean: CleanSummary,
    pub analyzed: u64,
    pub enrichment_misses: u64,
}

/// Output of the transform stage, handed to `load`.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub enriched: Vec<EnrichedRecord>,
    pub analytics: AnalyticsResult,
    pub summary: RunSummary,
}
