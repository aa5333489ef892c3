use crate::core::TransactionRecord;
use rust_decimal::Decimal;

/// Optional predicates narrowing the record set before analysis.
/// Absent predicate means no constraint.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub regions: Option<Vec<String>>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl FilterOptions {
    fn matches(&self, record: &TransactionRecord) -> bool {
        if let Some(regions) = &self.regions {
            if !regions.iter().any(|r| r == &record.region) {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if record.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if record.amount > max {
                return false;
            }
        }
        true
    }
}

/// A record passes only if it satisfies every supplied predicate.
/// An empty result is a normal outcome, not an error.
pub fn apply(records: Vec<TransactionRecord>, opts: &FilterOptions) -> Vec<TransactionRecord> {
    records.into_iter().filter(|r| opts.matches(r)).collect()
}
