use crate::core::{CleanOutcome, CleanSummary, RawRow, RejectReason, TransactionRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;

pub const EXPECTED_FIELDS: usize = 6;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates raw rows into transaction records.
///
/// Rules run in a fixed order and short-circuit on the first failure:
/// field count, amount, date, identifier fields. Rejected rows are counted
/// and logged, never fatal. When `drop_duplicates` is set, repeated
/// `transaction_id`s keep their first occurrence only.
pub fn clean(rows: Vec<RawRow>, drop_duplicates: bool) -> CleanOutcome {
    let mut records = Vec::new();
    let mut rejected = Vec::new();
    let mut summary = CleanSummary::default();
    let mut seen_ids = HashSet::new();

    for row in rows {
        summary.total_rows += 1;

        match validate_row(&row) {
            Ok(record) => {
                if drop_duplicates && !seen_ids.insert(record.transaction_id.clone()) {
                    tracing::debug!(
                        line = row.line,
                        transaction_id = %record.transaction_id,
                        "Dropping duplicate transaction"
                    );
                    summary.duplicates_dropped += 1;
                    continue;
                }
                summary.valid += 1;
                records.push(record);
            }
            Err(reason) => {
                tracing::warn!(line = row.line, %reason, "Rejecting malformed row");
                summary.rejected += 1;
                *summary.reject_counts.entry(reason).or_insert(0) += 1;
                rejected.push((row, reason));
            }
        }
    }

    CleanOutcome {
        records,
        rejected,
        summary,
    }
}

fn validate_row(row: &RawRow) -> Result<TransactionRecord, RejectReason> {
    if row.fields.len() != EXPECTED_FIELDS {
        return Err(RejectReason::FieldCount);
    }

    let amount = parse_amount(&row.fields[4]).ok_or(RejectReason::BadAmount)?;
    if amount < Decimal::ZERO {
        return Err(RejectReason::BadAmount);
    }

    let date = NaiveDate::parse_from_str(row.fields[5].trim(), DATE_FORMAT)
        .map_err(|_| RejectReason::BadDate)?;

    let transaction_id = row.fields[0].trim();
    let customer_id = row.fields[1].trim();
    let product_id = row.fields[2].trim();
    if transaction_id.is_empty() || customer_id.is_empty() || product_id.is_empty() {
        return Err(RejectReason::EmptyField);
    }

    Ok(TransactionRecord {
        transaction_id: transaction_id.to_string(),
        customer_id: customer_id.to_string(),
        product_id: product_id.to_string(),
        region: row.fields[3].trim().to_string(),
        amount,
        date,
    })
}

/// Legacy exports write amounts with thousands separators ("45,000").
fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim().replace(',', "").as_str()).ok()
}
