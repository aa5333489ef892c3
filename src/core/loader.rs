use crate::core::{RawRow, Result};

/// Input files come from legacy systems and are not guaranteed to be UTF-8.
/// Decode as UTF-8 when possible, otherwise fall back to Latin-1 (every byte
/// maps to exactly one char, so the fallback never fails).
pub fn decode_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            tracing::warn!("Input is not valid UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

/// Splits decoded text into raw rows on the `|` delimiter.
///
/// The first line is a header and is skipped. Blank lines are skipped.
/// Rows with the wrong number of fields are passed through untouched so the
/// cleaner can count and reject them.
pub fn split_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let fields: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        rows.push(RawRow { line, fields });
    }

    Ok(rows)
}
